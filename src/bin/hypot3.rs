use vecbench::units::Hypot3;
use vecbench::{BenchContext, Suite, setup_logging};

fn main() -> anyhow::Result<()> {
    setup_logging("warn")?;
    let mut suite = Suite::stdout(BenchContext::new());

    suite.bench_all::<f32, Hypot3>()?;
    suite.bench_all::<f64, Hypot3>()?;
    Ok(())
}
