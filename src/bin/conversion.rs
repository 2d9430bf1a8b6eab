use vecbench::units::Convert;
use vecbench::{BenchContext, Suite, setup_logging};

/// One table per target type. Vector conversions are only implemented for
/// concrete element pairs, so the targets are spelled out.
macro_rules! convert_to {
    ($suite:ident, $from:ty => $($to:ty),+ $(,)?) => {
        $( $suite.bench_all::<$from, Convert<$to>>()?; )+
    };
}

fn main() -> anyhow::Result<()> {
    setup_logging("warn")?;
    let mut suite = Suite::stdout(BenchContext::new());

    convert_to!(suite, f64 => f32, i64, u64, i32, u32, i16, u16, i8, u8);
    convert_to!(suite, f32 => f64, i64, u64, i32, u32, i16, u16, i8, u8);
    // only vectors of a different width make integer casts real work
    convert_to!(suite, i32 => f64, f32, i64, u64, u32, i16, u16, i8, u8);
    Ok(())
}
