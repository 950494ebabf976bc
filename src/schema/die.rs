use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("a dice pool needs at least one die")]
    Empty,
    #[error("a die needs at least one face")]
    ZeroFaces,
    #[error("could not parse dice '{0}'")]
    InvalidNotation(String),
}

/// A single die with faces numbered `1..=faces`.
///
/// `current` is the face the die is showing. It only moves while a
/// [`DicePool`] is being enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Die {
    faces: u32,
    current: u32,
}

impl Die {
    /// Create a die showing face 1.
    pub fn new(faces: u32) -> Result<Self, PoolError> {
        if faces == 0 {
            return Err(PoolError::ZeroFaces);
        }
        Ok(Self { faces, current: 1 })
    }

    pub fn faces(&self) -> u32 {
        self.faces
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn is_at_maximum(&self) -> bool {
        self.current == self.faces
    }
}

/// An ordered, non-empty set of dice.
///
/// The pool doubles as an odometer: each die is one digit of a mixed-radix
/// number whose digits run `1..=faces` and whose least significant digit is
/// the last die. [`DicePool::advance`] steps through every combination of
/// faces exactly once, starting from all ones and ending at all maximums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DicePool {
    dice: Vec<Die>,
}

impl DicePool {
    /// Build a pool from dice, resetting every die to face 1.
    pub fn new(dice: Vec<Die>) -> Result<Self, PoolError> {
        if dice.is_empty() {
            return Err(PoolError::Empty);
        }
        let mut pool = Self { dice };
        pool.reset();
        Ok(pool)
    }

    /// Build a pool from a list of face counts.
    pub fn from_faces(faces: &[u32]) -> Result<Self, PoolError> {
        let dice = faces
            .iter()
            .map(|&f| Die::new(f))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(dice)
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Die> {
        self.dice.iter()
    }

    /// Face counts in pool order.
    pub fn faces(&self) -> Vec<u32> {
        self.dice.iter().map(Die::faces).collect()
    }

    /// Sum of the faces currently showing.
    pub fn current_sum(&self) -> i64 {
        self.dice.iter().map(|d| i64::from(d.current)).sum()
    }

    /// Smallest possible sum: every die showing 1.
    pub fn min_sum(&self) -> i64 {
        self.dice.len() as i64
    }

    /// Largest possible sum: every die showing its maximum.
    pub fn max_sum(&self) -> i64 {
        self.dice.iter().map(|d| i64::from(d.faces)).sum()
    }

    /// True when every die shows its maximum face.
    pub fn is_at_maximum(&self) -> bool {
        self.dice.iter().all(Die::is_at_maximum)
    }

    /// Put every die back on face 1.
    pub fn reset(&mut self) {
        for die in &mut self.dice {
            die.current = 1;
        }
    }

    /// Step to the next combination of faces.
    ///
    /// Increments the last die; a die that passes its maximum goes back to 1
    /// and carries into the die before it. The carry out of the first die is
    /// discarded, so at the all-maximum state the pool is left unchanged and
    /// `false` is returned.
    pub fn advance(&mut self) -> bool {
        if self.is_at_maximum() {
            return false;
        }
        for die in self.dice.iter_mut().rev() {
            if die.current < die.faces {
                die.current += 1;
                return true;
            }
            die.current = 1;
        }
        true
    }
}
