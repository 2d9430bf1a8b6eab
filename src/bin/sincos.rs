use vecbench::units::{CosOp, SinCos, SinOp};
use vecbench::{BenchContext, Suite, setup_logging};

fn main() -> anyhow::Result<()> {
    setup_logging("warn")?;
    let mut suite = Suite::stdout(BenchContext::new());

    suite.bench_all::<f32, SinCos<SinOp>>()?;
    suite.bench_all::<f32, SinCos<CosOp>>()?;
    suite.bench_all::<f64, SinCos<SinOp>>()?;
    suite.bench_all::<f64, SinCos<CosOp>>()?;
    Ok(())
}
