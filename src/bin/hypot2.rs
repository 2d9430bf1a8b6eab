use vecbench::units::Hypot2;
use vecbench::{BenchContext, Suite, setup_logging};

fn main() -> anyhow::Result<()> {
    setup_logging("warn")?;
    let mut suite = Suite::stdout(BenchContext::new());

    suite.bench_all::<f32, Hypot2>()?;
    suite.bench_all::<f64, Hypot2>()?;
    Ok(())
}
