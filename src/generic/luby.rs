/*!
The luby sequence, as used to schedule restarts.

See <https://oeis.org/A182105> for details on the luby sequence.

[luby] returns the *exponent* of the `x`th element of the sequence --- the sequence element itself is `2^luby(x)`, and [luby_exp] generalises the doubling to an arbitrary base.
The restart loop multiplies `luby_exp(x, base)` by the initial restart interval to obtain the conflict budget of iteration `x`.
*/

/// Representation used for numbers in a luby sequence.
pub type LubyRepresentation = u32;

/// The exponent of the `x`th element of the luby sequence (zero-indexed).
pub fn luby(x: LubyRepresentation) -> LubyRepresentation {
    // Find the first complete doubling prefix covering x.
    let mut exponent: LubyRepresentation = 0;
    let mut size: LubyRepresentation = 1;
    while size < x + 1 {
        exponent += 1;
        size = (2 * size) + 1;
    }

    // Walk down the prefix to the element.
    let mut x = x;
    while size - 1 != x {
        size = (size - 1) >> 1;
        exponent -= 1;
        x %= size;
    }

    exponent
}

/// `base` to the power of [luby]\(x).
pub fn luby_exp(x: LubyRepresentation, base: f64) -> f64 {
    base.powi(luby(x) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    // https://oeis.org/A182105
    const LUBY_SLICE: &[LubyRepresentation] = &[
        1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8,
        16, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4,
        8, 16, 32, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1,
        2, 4, 8, 16, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8,
    ];

    #[test]
    fn luby_base_two() {
        for (x, known_value) in LUBY_SLICE.iter().enumerate() {
            assert_eq!(1 << luby(x as LubyRepresentation), *known_value);
        }
    }

    #[test]
    fn luby_exp_base_three() {
        assert_eq!(luby_exp(0, 3.0), 1.0);
        assert_eq!(luby_exp(2, 3.0), 3.0);
        assert_eq!(luby_exp(14, 3.0), 27.0);
    }
}
