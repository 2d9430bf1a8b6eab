use vecbench::units::Store;
use vecbench::{BenchContext, HList, Rep, Suite, setup_logging, tag};

/// Odd array lengths that no vector width divides.
type Odd<T> = HList!(Rep<[T; 3], tag::FixedSize>, Rep<[T; 7], tag::FixedSize>);

fn main() -> anyhow::Result<()> {
    setup_logging("warn")?;
    let mut suite = Suite::stdout(BenchContext::new());

    suite.bench_all_with::<i8, Store, Odd<i8>>()?;
    suite.bench_all_with::<i16, Store, Odd<i16>>()?;
    suite.bench_all_with::<i32, Store, Odd<i32>>()?;
    suite.bench_all_with::<i64, Store, Odd<i64>>()?;
    suite.bench_all_with::<f32, Store, Odd<f32>>()?;
    suite.bench_all_with::<f64, Store, Odd<f64>>()?;
    Ok(())
}
