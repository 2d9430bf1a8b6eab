use vecbench::units::Scalbn;
use vecbench::{BenchContext, Suite, setup_logging};

fn main() -> anyhow::Result<()> {
    setup_logging("warn")?;
    let mut suite = Suite::stdout(BenchContext::new());

    suite.bench_all::<f32, Scalbn>()?;
    suite.bench_all::<f64, Scalbn>()?;
    Ok(())
}
