use vecbench::units::{Ceil, Floor, Nearbyint, Rint, Round, Rounding};
use vecbench::{BenchContext, Suite, setup_logging};

fn main() -> anyhow::Result<()> {
    setup_logging("warn")?;
    // fixed seed: every run rounds the same inputs
    let mut suite = Suite::stdout(BenchContext::seeded(1));

    suite.bench_all::<f32, Rounding<Floor>>()?;
    suite.bench_all::<f32, Rounding<Ceil>>()?;
    suite.bench_all::<f32, Rounding<Round>>()?;
    suite.bench_all::<f32, Rounding<Rint>>()?;
    suite.bench_all::<f32, Rounding<Nearbyint>>()?;
    suite.bench_all::<f64, Rounding<Floor>>()?;
    suite.bench_all::<f64, Rounding<Ceil>>()?;
    suite.bench_all::<f64, Rounding<Round>>()?;
    suite.bench_all::<f64, Rounding<Rint>>()?;
    suite.bench_all::<f64, Rounding<Nearbyint>>()?;
    Ok(())
}
