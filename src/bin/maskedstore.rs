use vecbench::units::MaskedStore;
use vecbench::{BenchContext, Suite, setup_logging};

fn main() -> anyhow::Result<()> {
    setup_logging("warn")?;
    let mut suite = Suite::stdout(BenchContext::new());

    suite.bench_all::<i8, MaskedStore>()?;
    suite.bench_all::<i16, MaskedStore>()?;
    suite.bench_all::<i32, MaskedStore>()?;
    suite.bench_all::<i64, MaskedStore>()?;
    suite.bench_all::<f32, MaskedStore>()?;
    suite.bench_all::<f64, MaskedStore>()?;
    Ok(())
}
