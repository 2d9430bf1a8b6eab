use vecbench::units::{Exp, ExpOp, Expm1Op};
use vecbench::{BenchContext, Suite, setup_logging};

fn main() -> anyhow::Result<()> {
    setup_logging("warn")?;
    let mut suite = Suite::stdout(BenchContext::new());

    suite.bench_all::<f32, Exp<ExpOp>>()?;
    suite.bench_all::<f64, Exp<ExpOp>>()?;
    suite.bench_all::<f32, Exp<Expm1Op>>()?;
    suite.bench_all::<f64, Exp<Expm1Op>>()?;
    Ok(())
}
