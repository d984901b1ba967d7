// ============================================================================
// Basic Usage Example
// ============================================================================
//
// Run with `--features logging` to see algorithm-selection traces.

use arbnum::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== Big Integers ===\n");

    let a: BigInteger = "123456789123456789123456789".parse()?;
    let b: BigInteger = "987654321987654321987654321".parse()?;
    println!("{} * {} =\n  {}", a, b, a.times(&b));

    let (q, r) = b.div_mod(&BigInteger::from(-97))?;
    println!("{} divmod -97 = ({}, {})", b, q, r);

    let two = BigInteger::from(2);
    let mersenne = two.pow(&BigInteger::from(127))?.prev();
    println!("2^127 - 1 = {} (prime: {})", mersenne, mersenne.is_prime(false));
    println!("  in hex: {}", mersenne.to_string_radix(16)?);
    println!("gcd(1071, 462) = {}", BigInteger::from(1071).gcd(&BigInteger::from(462)));
    println!("3^200 mod 1000007 = {}", BigInteger::from(3).mod_pow(&BigInteger::from(200), &BigInteger::from(1_000_007))?);

    println!("\n=== Decimals ===\n");

    let ctx = DecimalContext::default();
    let third = Decimal::from(1).divided_by(&Decimal::from(3), &ctx)?;
    println!("1/3 at {} digits = {}", ctx.precision, third);

    let price: Decimal = "19.99".parse()?;
    let qty = Decimal::from(3);
    println!("19.99 * 3 = {}", price.times(&qty, &ctx)?.to_fixed(2, ctx.rounding)?);

    let wide = DecimalContext::default().with_precision(50);
    println!("sqrt(2) = {}", Decimal::from(2).sqrt(&wide)?);
    println!("e       = {}", Decimal::from(1).exp(&wide)?);
    println!("ln(2)   = {}", Decimal::from(2).ln(&wide)?);
    println!("2^0.5   = {}", Decimal::from(2).pow(&"0.5".parse()?, &ctx)?);

    println!("\n=== Rounding Modes (2.5 to 0 places) ===\n");
    let tie: Decimal = "2.5".parse()?;
    for rm in RoundingMode::ALL {
        println!("  {:<10} {:>3} {:>3}", format!("{:?}", rm), tie.to_fixed(0, rm)?, tie.neg().to_fixed(0, rm)?);
    }

    Ok(())
}
