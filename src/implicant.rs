//! Product terms as `(value, mask)` bit patterns.

use serde::Serialize;

/// A product term over `n` variables.
///
/// Bits set in `mask` are generalized away (the variable does not appear in the
/// term); the remaining bits of `value` give the polarity of each literal.
/// Masked bits of `value` are always zero, so equal terms compare equal.
///
/// An implicant with `k` mask bits covers exactly `2^k` assignments.
///
/// # Examples
/// ```
/// use kmap_sop::Implicant;
///
/// // A.!C over (A, B, C): B is generalized away
/// let term = Implicant::new(0b100, 0b010);
/// assert_eq!(term.covered(3), [0b100, 0b110]);
/// assert_eq!(term.literal_count(3), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Implicant {
    pub value: u32,
    pub mask: u32,
}

impl Implicant {
    pub fn new(value: u32, mask: u32) -> Self {
        Implicant {
            value: value & !mask,
            mask,
        }
    }

    /// The implicant covering a single assignment.
    pub fn minterm(index: u32) -> Self {
        Implicant::new(index, 0)
    }

    /// Merges two implicants whose masks are equal and whose values differ in
    /// exactly one position outside the mask.
    ///
    /// # Examples
    /// ```
    /// use kmap_sop::Implicant;
    ///
    /// let a = Implicant::new(0b0101, 0b0010);
    /// let b = Implicant::new(0b0100, 0b0010);
    /// assert_eq!(a.combine(&b), Some(Implicant::new(0b0100, 0b0011)));
    ///
    /// // different masks never combine
    /// assert_eq!(a.combine(&Implicant::minterm(0b0100)), None);
    /// ```
    pub fn combine(&self, other: &Implicant) -> Option<Implicant> {
        if self.mask != other.mask {
            return None;
        }
        let difference = (self.value ^ other.value) & !self.mask;
        if difference.count_ones() != 1 {
            return None;
        }
        Some(Implicant::new(self.value, self.mask | difference))
    }

    /// Number of assignments covered.
    pub fn span(&self) -> u32 {
        1 << self.mask.count_ones()
    }

    pub fn literal_count(&self, n_variables: usize) -> usize {
        n_variables - self.mask.count_ones() as usize
    }

    pub fn contains(&self, index: u32) -> bool {
        index & !self.mask == self.value
    }

    /// Covered assignment indices in ascending order.
    pub fn covered(&self, n_variables: usize) -> Vec<u32> {
        (0..1u32 << n_variables).filter(|&i| self.contains(i)).collect()
    }

    /// Covered assignments as a bitset (bit `i` is assignment `i`).
    pub fn covered_bits(&self, n_variables: usize) -> u32 {
        self.covered(n_variables)
            .iter()
            .fold(0, |acc, &i| acc | (1 << i))
    }

    /// The literals of the term in variable order, as `(variable, positive)`.
    pub fn literals(&self, n_variables: usize) -> Vec<(usize, bool)> {
        (0..n_variables)
            .filter_map(|var| {
                let bit = 1 << (n_variables - 1 - var);
                if self.mask & bit != 0 {
                    None
                } else {
                    Some((var, self.value & bit != 0))
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn new_clears_masked_value_bits() {
        assert_eq!(Implicant::new(0b111, 0b010), Implicant::new(0b101, 0b010));
        assert_eq!(Implicant::new(0b111, 0b010).value, 0b101);
    }

    #[test]
    fn combine_needs_exactly_one_difference() {
        let a = Implicant::minterm(0b000);
        assert_eq!(
            a.combine(&Implicant::minterm(0b001)),
            Some(Implicant::new(0, 0b001))
        );
        assert_eq!(a.combine(&Implicant::minterm(0b011)), None);
        assert_eq!(a.combine(&a), None);
    }

    #[test]
    fn combine_is_symmetric() {
        let a = Implicant::new(0b1000, 0b0001);
        let b = Implicant::new(0b1100, 0b0001);
        assert_eq!(a.combine(&b), b.combine(&a));
        assert_eq!(a.combine(&b).unwrap().span(), 4);
    }

    #[test]
    fn coverage() {
        let term = Implicant::new(0b01, 0b10);
        assert!(term.contains(0b01));
        assert!(term.contains(0b11));
        assert!(!term.contains(0b00));
        assert_eq!(term.covered_bits(2), 0b1010);
    }

    #[test]
    fn literals_follow_variable_order() {
        // !A.C over (A, B, C)
        let term = Implicant::new(0b001, 0b010);
        assert_eq!(term.literals(3), [(0, false), (2, true)]);
        assert_eq!(term.literal_count(3), 2);
        assert!(Implicant::new(0, 0b111).literals(3).is_empty());
    }
}
