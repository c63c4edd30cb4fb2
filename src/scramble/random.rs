/// Source of the random draws a transition needs.
///
/// Reveal windows and placeholder choices are pure functions of the values
/// returned here, so a seeded source yields reproducible frames.
pub trait RandomSource {
    /// A uniform integer in `[0, bound)`. `bound` is never zero.
    fn below(&mut self, bound: u32) -> u32;

    /// A uniform float in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

impl RandomSource for fastrand::Rng {
    fn below(&mut self, bound: u32) -> u32 {
        self.u32(..bound)
    }

    fn unit(&mut self) -> f64 {
        self.f64()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn below(&mut self, bound: u32) -> u32 {
        (**self).below(bound)
    }

    fn unit(&mut self) -> f64 {
        (**self).unit()
    }
}

#[cfg(test)]
pub(crate) mod scripted {
    use super::RandomSource;
    use std::collections::VecDeque;

    /// Replays fixed draws, falling back to zero once a script runs out.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedRandom {
        below: VecDeque<u32>,
        unit: VecDeque<f64>,
    }

    impl ScriptedRandom {
        pub(crate) fn new(below: &[u32], unit: &[f64]) -> Self {
            Self { below: below.iter().copied().collect(), unit: unit.iter().copied().collect() }
        }
    }

    impl RandomSource for ScriptedRandom {
        fn below(&mut self, bound: u32) -> u32 {
            self.below.pop_front().unwrap_or(0).min(bound - 1)
        }

        fn unit(&mut self) -> f64 {
            self.unit.pop_front().unwrap_or(0.0)
        }
    }
}
