//! Garde-fous du noyau (configuration).
//!
//! Aucun état global : chaque appel reçoit ses limites (ou `Limites::default()`).

/// Longueur max d’une expression (en caractères).
pub const LONGUEUR_MAX_DEFAUT: usize = 4096;

/// Taille max (en bits) d’une puissance calculée exactement.
/// Au-delà, `^` passe par `f64::powf` (anti-gel : pas de big int géant).
pub const BITS_EXACTS_MAX_DEFAUT: u64 = 1 << 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limites {
    pub longueur_max: usize,
    pub bits_exacts_max: u64,
}

impl Default for Limites {
    fn default() -> Self {
        Self {
            longueur_max: LONGUEUR_MAX_DEFAUT,
            bits_exacts_max: BITS_EXACTS_MAX_DEFAUT,
        }
    }
}

impl Limites {
    pub fn with_longueur_max(mut self, longueur_max: usize) -> Self {
        self.longueur_max = longueur_max;
        self
    }

    pub fn with_bits_exacts_max(mut self, bits: u64) -> Self {
        self.bits_exacts_max = bits;
        self
    }
}
