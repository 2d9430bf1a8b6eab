use vecbench::units::Divides;
use vecbench::{BenchContext, Suite, setup_logging};

fn main() -> anyhow::Result<()> {
    setup_logging("warn")?;
    let mut suite = Suite::stdout(BenchContext::new());

    suite.bench_all::<i8, Divides>()?;
    suite.bench_all::<u8, Divides>()?;
    suite.bench_all::<i16, Divides>()?;
    suite.bench_all::<u16, Divides>()?;
    suite.bench_all::<i32, Divides>()?;
    suite.bench_all::<u32, Divides>()?;
    suite.bench_all::<i64, Divides>()?;
    suite.bench_all::<u64, Divides>()?;
    suite.bench_all::<f32, Divides>()?;
    suite.bench_all::<f64, Divides>()?;
    Ok(())
}
