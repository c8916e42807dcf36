//! Floating-point smoke suite run through the testmain launcher.
//!
//! `float::divide_by_zero` is ignored by default. Running it with
//! `--enable-fpe --include-ignored` shows trapping at work: the division
//! raises `SIGFPE` instead of producing an infinity.

use std::hint::black_box;

use libtest_mimic::{Failed, Trial};
use testmain::{cli, MimicSession};

fn main() {
    let session = MimicSession::new("testmain")
        .with_about("Floating point smoke tests run through the testmain launcher")
        .trial(Trial::test("float::finite_arithmetic", finite_arithmetic))
        .trial(Trial::test("float::quiet_nan_comparisons", quiet_nan_comparisons))
        .trial(Trial::test("float::divide_by_zero", divide_by_zero).with_ignored_flag(true));
    cli::run(session)
}

fn finite_arithmetic() -> Result<(), Failed> {
    let sum = black_box(0.5_f64) + black_box(0.25_f64);
    if sum != 0.75 {
        return Err(format!("0.5 + 0.25 = {sum}").into());
    }
    Ok(())
}

// Comparing a NaN that already exists raises nothing, traps or not.
fn quiet_nan_comparisons() -> Result<(), Failed> {
    let nan = black_box(f64::NAN);
    if nan.is_nan() && nan != black_box(f64::NAN) {
        Ok(())
    } else {
        Err("NaN compared equal to itself".into())
    }
}

fn divide_by_zero() -> Result<(), Failed> {
    let quotient = black_box(1.0_f64) / black_box(0.0_f64);
    if quotient.is_infinite() {
        Ok(())
    } else {
        Err(format!("1.0 / 0.0 = {quotient}").into())
    }
}
