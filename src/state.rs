//! State encoding: disc-position vectors packed into base-R integers.
//!
//! A configuration of `N` discs over `R` rods is a vector of `N` rod
//! assignments, smallest disc first. The vector is packed into a single
//! [`StateId`] by reading it as an `N`-digit base-`R` number with the
//! smallest disc in the most significant position. Stacking order is never
//! stored; it is implied by disc size and enforced during expansion.

use thiserror::Error;

use crate::rules::MAX_RODS;

/// Packed identifier of a puzzle state: the disc-position vector read as a
/// base-R number. Always in `[0, R^N)` for the owning [`StateSpace`].
pub type StateId = u64;

/// Errors from constructing a state space or converting states.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// A vector component named a rod the space does not have.
    #[error("rod {rod} out of range for {rods} rods")]
    RodOutOfRange { rod: u8, rods: u8 },
    /// An identifier at or past `R^N`.
    #[error("state id {id} out of range ({capacity} states)")]
    IdOutOfRange { id: StateId, capacity: u64 },
    /// `R^N` does not fit the 64-bit identifier. Checked up front rather
    /// than silently truncated.
    #[error("{rods}^{discs} states do not fit a 64-bit id")]
    SpaceTooLarge { rods: u8, discs: u8 },
    /// A vector whose length disagrees with the disc count.
    #[error("vector length {len} does not match {discs} discs")]
    LengthMismatch { len: usize, discs: u8 },
    /// Rod counts outside `2..=16` are not representable.
    #[error("rod count {rods} outside the supported range 2..=16")]
    RodCountUnsupported { rods: u8 },
    /// A tower needs at least one disc.
    #[error("disc count must be at least 1")]
    NoDiscs,
}

/// Dimensions of a puzzle plus the codec between disc-position vectors and
/// packed [`StateId`]s.
///
/// `encode` and `decode` are mutual inverses over the legal domain: every
/// vector with components in `[0, R)` maps to a unique id in `[0, R^N)` and
/// back.
///
/// ```
/// use hanoi_search::state::StateSpace;
///
/// let space = StateSpace::new(3, 2).unwrap();
/// assert_eq!(space.capacity(), 9);
/// assert_eq!(space.encode(&[2, 1]).unwrap(), 7); // 2*3 + 1
/// assert_eq!(space.decode(7).unwrap(), vec![2, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSpace {
    rods: u8,
    discs: u8,
    /// `weights[i] = R^(N-1-i)`, the place value of disc `i`'s digit.
    weights: Vec<u64>,
    capacity: u64,
}

impl StateSpace {
    /// Build a space for `discs` discs over `rods` rods.
    ///
    /// Fails unless `rods^discs` is representable in a `u64`; for example
    /// 4 rods support up to 31 discs.
    pub fn new(rods: u8, discs: u8) -> Result<Self, CodecError> {
        if rods < 2 || rods > MAX_RODS {
            return Err(CodecError::RodCountUnsupported { rods });
        }
        if discs == 0 {
            return Err(CodecError::NoDiscs);
        }
        let capacity = (rods as u64)
            .checked_pow(discs as u32)
            .ok_or(CodecError::SpaceTooLarge { rods, discs })?;
        let mut weights = vec![0u64; discs as usize];
        let mut w = 1u64;
        for slot in weights.iter_mut().rev() {
            *slot = w;
            // The last multiply is unused; saturate instead of overflowing.
            w = w.saturating_mul(rods as u64);
        }
        Ok(StateSpace { rods, discs, weights, capacity })
    }

    /// Number of rods `R`.
    #[inline]
    pub fn rods(&self) -> u8 {
        self.rods
    }

    /// Number of discs `N`.
    #[inline]
    pub fn discs(&self) -> u8 {
        self.discs
    }

    /// Total number of states, `R^N`.
    #[inline]
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Place value of disc `i`'s digit, `R^(N-1-i)`.
    #[inline]
    pub(crate) fn weight(&self, disc: usize) -> u64 {
        self.weights[disc]
    }

    /// Check that `id` names a state of this space.
    #[inline]
    pub fn validate_id(&self, id: StateId) -> Result<(), CodecError> {
        if id < self.capacity {
            Ok(())
        } else {
            Err(CodecError::IdOutOfRange { id, capacity: self.capacity })
        }
    }

    /// Pack a disc-position vector into its identifier.
    pub fn encode(&self, vector: &[u8]) -> Result<StateId, CodecError> {
        if vector.len() != self.discs as usize {
            return Err(CodecError::LengthMismatch { len: vector.len(), discs: self.discs });
        }
        let mut id = 0u64;
        for (&rod, &w) in vector.iter().zip(&self.weights) {
            if rod >= self.rods {
                return Err(CodecError::RodOutOfRange { rod, rods: self.rods });
            }
            id += rod as u64 * w;
        }
        Ok(id)
    }

    /// Unpack an identifier into a fresh disc-position vector.
    pub fn decode(&self, id: StateId) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        self.decode_into(id, &mut out)?;
        Ok(out)
    }

    /// Unpack an identifier into `out`, reusing its allocation.
    pub fn decode_into(&self, id: StateId, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.validate_id(id)?;
        out.clear();
        out.resize(self.discs as usize, 0);
        let mut rem = id;
        let base = self.rods as u64;
        for slot in out.iter_mut().rev() {
            *slot = (rem % base) as u8;
            rem /= base;
        }
        Ok(())
    }

    /// Identifier of the state with every disc on `rod`.
    pub fn uniform(&self, rod: u8) -> Result<StateId, CodecError> {
        if rod >= self.rods {
            return Err(CodecError::RodOutOfRange { rod, rods: self.rods });
        }
        Ok(self.weights.iter().map(|&w| rod as u64 * w).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn encode_matches_place_values() {
        let space = StateSpace::new(4, 3).unwrap();
        assert_eq!(space.encode(&[0, 0, 0]).unwrap(), 0);
        assert_eq!(space.encode(&[0, 0, 1]).unwrap(), 1);
        assert_eq!(space.encode(&[0, 1, 0]).unwrap(), 4);
        assert_eq!(space.encode(&[1, 0, 0]).unwrap(), 16);
        assert_eq!(space.encode(&[3, 3, 3]).unwrap(), 63);
    }

    #[test]
    fn decode_matches_place_values() {
        let space = StateSpace::new(4, 3).unwrap();
        assert_eq!(space.decode(0).unwrap(), vec![0, 0, 0]);
        assert_eq!(space.decode(1).unwrap(), vec![0, 0, 1]);
        assert_eq!(space.decode(4).unwrap(), vec![0, 1, 0]);
        assert_eq!(space.decode(16).unwrap(), vec![1, 0, 0]);
        assert_eq!(space.decode(63).unwrap(), vec![3, 3, 3]);
    }

    #[test]
    fn round_trip_exhaustive_small() {
        let space = StateSpace::new(3, 4).unwrap();
        for id in 0..space.capacity() {
            let v = space.decode(id).unwrap();
            assert_eq!(space.encode(&v).unwrap(), id);
        }
    }

    #[test]
    fn round_trip_random_vectors() {
        let mut rng = StdRng::seed_from_u64(42);
        for &(rods, discs) in &[(2u8, 10u8), (3, 12), (4, 20), (7, 15), (16, 12)] {
            let space = StateSpace::new(rods, discs).unwrap();
            for _ in 0..200 {
                let v: Vec<u8> = (0..discs).map(|_| rng.gen_range(0..rods)).collect();
                let id = space.encode(&v).unwrap();
                assert_eq!(space.decode(id).unwrap(), v);
            }
        }
    }

    #[test]
    fn uniform_states() {
        let space = StateSpace::new(4, 30).unwrap();
        assert_eq!(space.uniform(0).unwrap(), 0);
        assert_eq!(space.uniform(3).unwrap(), space.capacity() - 1);
        let v = space.decode(space.uniform(2).unwrap()).unwrap();
        assert!(v.iter().all(|&r| r == 2));
    }

    #[test]
    fn rejects_out_of_range() {
        let space = StateSpace::new(3, 2).unwrap();
        assert_eq!(
            space.encode(&[0, 3]),
            Err(CodecError::RodOutOfRange { rod: 3, rods: 3 })
        );
        assert_eq!(
            space.decode(9).unwrap_err(),
            CodecError::IdOutOfRange { id: 9, capacity: 9 }
        );
        assert_eq!(
            space.encode(&[0, 0, 0]).unwrap_err(),
            CodecError::LengthMismatch { len: 3, discs: 2 }
        );
        assert_eq!(space.uniform(3).unwrap_err(), CodecError::RodOutOfRange { rod: 3, rods: 3 });
    }

    #[test]
    fn rejects_unrepresentable_spaces() {
        // 4^30 fits a u64, 4^32 does not.
        assert!(StateSpace::new(4, 30).is_ok());
        assert_eq!(
            StateSpace::new(4, 32).unwrap_err(),
            CodecError::SpaceTooLarge { rods: 4, discs: 32 }
        );
        assert_eq!(StateSpace::new(1, 5).unwrap_err(), CodecError::RodCountUnsupported { rods: 1 });
        assert_eq!(StateSpace::new(17, 5).unwrap_err(), CodecError::RodCountUnsupported { rods: 17 });
        assert_eq!(StateSpace::new(3, 0).unwrap_err(), CodecError::NoDiscs);
    }
}
