// ============================================================================
// Digit Words
// Helpers over base-10^7 digit words (most significant first)
// ============================================================================

/// Radix of one digit word.
pub(crate) const BASE: u32 = 10_000_000;

/// Decimal digits per word.
pub(crate) const LOG_BASE: i64 = 7;

/// `10^n` for `n` in `0..=18`.
#[inline]
pub(crate) fn pow10(n: i64) -> u64 {
    10u64.pow(n as u32)
}

/// Number of decimal digits in a word (`0` has one digit).
#[inline]
pub(crate) fn digit_count(mut w: u32) -> i64 {
    let mut n = 1;
    while w >= 10 {
        w /= 10;
        n += 1;
    }
    n
}

/// Concatenate words into a digit string without trailing zeros.
pub(crate) fn digits_to_string(d: &[u32]) -> String {
    let Some((&first, rest)) = d.split_first() else {
        return "0".to_string();
    };
    let mut out = String::with_capacity(d.len() * LOG_BASE as usize);
    out.push_str(&first.to_string());
    for w in rest {
        out.push_str(&format!("{:07}", w));
    }
    let trimmed_len = out.trim_end_matches('0').len();
    if trimmed_len == 0 {
        return "0".to_string();
    }
    out.truncate(trimmed_len);
    out
}

/// `x * k` for a single-word multiplier, keeping any carry as a new leading word.
pub(crate) fn multiply_integer(x: &[u32], k: u32) -> Vec<u32> {
    let mut carry = 0u64;
    let mut out = x.to_vec();
    for w in out.iter_mut().rev() {
        let product = *w as u64 * k as u64 + carry;
        *w = (product % BASE as u64) as u32;
        carry = product / BASE as u64;
    }
    if carry > 0 {
        out.insert(0, carry as u32);
    }
    out
}

/// Compare the first `a_len`/`b_len` words; a longer prefix is larger.
pub(crate) fn compare_words(a: &[u32], b: &[u32], a_len: usize, b_len: usize) -> i32 {
    if a_len != b_len {
        return if a_len > b_len { 1 } else { -1 };
    }
    for i in 0..a_len {
        let (x, y) = (a.get(i).copied().unwrap_or(0), b.get(i).copied().unwrap_or(0));
        if x != y {
            return if x > y { 1 } else { -1 };
        }
    }
    0
}

/// In-place `a -= b` over the first `a_len` words, then drop leading zero words.
pub(crate) fn subtract_words(a: &mut Vec<u32>, b: &[u32], a_len: usize) {
    let base = BASE as i64;
    let mut borrow = 0i64;
    for i in (0..a_len).rev() {
        let mut w = a[i] as i64 - borrow;
        let sub = b.get(i).copied().unwrap_or(0) as i64;
        borrow = if w < sub { 1 } else { 0 };
        w = borrow * base + w - sub;
        a[i] = w as u32;
    }
    while a.len() > 1 && a[0] == 0 {
        a.remove(0);
    }
}
