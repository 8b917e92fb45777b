use crate::model::Employee;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Départage des candidats à charge égale.
///
/// `tied` est non vide et suit l'ordre de la liste d'employés fournie au
/// moteur. Un indice hors bornes est ramené modulo `tied.len()`.
pub trait TieBreak {
    fn pick(&mut self, tied: &[&Employee]) -> usize;
}

impl<F> TieBreak for F
where
    F: FnMut(&[&Employee]) -> usize,
{
    fn pick(&mut self, tied: &[&Employee]) -> usize {
        self(tied)
    }
}

/// Tirage uniforme parmi les ex aequo.
#[derive(Debug, Clone)]
pub struct RandomTieBreak<R> {
    rng: R,
}

impl RandomTieBreak<ThreadRng> {
    pub fn thread() -> Self {
        Self { rng: rand::rng() }
    }
}

impl RandomTieBreak<StdRng> {
    /// Tirage reproductible.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomTieBreak<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for RandomTieBreak<ThreadRng> {
    fn default() -> Self {
        Self::thread()
    }
}

impl<R: Rng> TieBreak for RandomTieBreak<R> {
    fn pick(&mut self, tied: &[&Employee]) -> usize {
        if tied.len() <= 1 {
            return 0;
        }
        self.rng.random_range(0..tied.len())
    }
}

/// Déterministe : premier employé dans l'ordre fourni.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstListed;

impl TieBreak for FirstListed {
    fn pick(&mut self, _tied: &[&Employee]) -> usize {
        0
    }
}
