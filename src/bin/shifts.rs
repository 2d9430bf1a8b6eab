use std::io::Write;

use vecbench::units::shifts::ShiftKind;
use vecbench::units::{
    LeftInt, LeftIntConst, LeftVec, LeftVecConst, RightInt, RightIntConst, RightVec,
    RightVecConst, Shift,
};
use vecbench::{BenchContext, Suite, setup_logging};

fn all_integers<K: ShiftKind, W: Write>(suite: &mut Suite<W>) -> vecbench::Result<()> {
    suite.bench_all::<i8, Shift<K>>()?;
    suite.bench_all::<u8, Shift<K>>()?;
    suite.bench_all::<i16, Shift<K>>()?;
    suite.bench_all::<u16, Shift<K>>()?;
    suite.bench_all::<i32, Shift<K>>()?;
    suite.bench_all::<u32, Shift<K>>()?;
    suite.bench_all::<i64, Shift<K>>()?;
    suite.bench_all::<u64, Shift<K>>()
}

fn main() -> anyhow::Result<()> {
    setup_logging("warn")?;
    let mut suite = Suite::stdout(BenchContext::new());

    all_integers::<LeftVec, _>(&mut suite)?;
    all_integers::<LeftVecConst, _>(&mut suite)?;
    all_integers::<LeftInt, _>(&mut suite)?;
    all_integers::<LeftIntConst, _>(&mut suite)?;
    all_integers::<RightVec, _>(&mut suite)?;
    all_integers::<RightVecConst, _>(&mut suite)?;
    all_integers::<RightInt, _>(&mut suite)?;
    all_integers::<RightIntConst, _>(&mut suite)?;
    Ok(())
}
