//! Particle types and card designators
//!
//! MCNP identifies transport particles by single-character symbols, and many
//! cards carry a `:<designator>` segment listing one or more of them, e.g.
//! `f4:n` or `cut:n,p`. The full MCNP6 particle table is supported.
//!
//! A [Designator] is an ordered list, not a set. The order given on the card
//! is semantically meaningful and is preserved exactly, duplicates included.

// internal modules
use crate::error::{Error, Result};

// external crates
use itertools::Itertools;
use serde::Serialize;

/// All particle types recognised on MCNP cards
///
/// One variant per symbol in the MCNP6 particle table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Particle {
    /// `n`
    Neutron,
    /// `q`
    AntiNeutron,
    /// `p`
    Photon,
    /// `e`
    Electron,
    /// `f`
    Positron,
    /// `|`
    MuonMinus,
    /// `!`
    MuonPlus,
    /// `u`
    ElectronNeutrino,
    /// `<`
    AntiElectronNeutrino,
    /// `v`
    MuonNeutrino,
    /// `>`
    AntiMuonNeutrino,
    /// `h`
    Proton,
    /// `g`
    AntiProton,
    /// `l`
    Lambda,
    /// `b`
    AntiLambda,
    /// `+`
    SigmaPlus,
    /// `_`
    AntiSigmaPlus,
    /// `-`
    SigmaMinus,
    /// `~`
    AntiSigmaMinus,
    /// `x`
    Xi0,
    /// `c`
    AntiXi0,
    /// `y`
    XiMinus,
    /// `w`
    XiPlus,
    /// `o`
    Omega,
    /// `@`
    AntiOmega,
    /// `/`
    PionPlus,
    /// `*`
    PionMinus,
    /// `z`
    Pion0,
    /// `k`
    KaonPlus,
    /// `?`
    KaonMinus,
    /// `%`
    KaonShort,
    /// `^`
    KaonLong,
    /// `d`
    Deuteron,
    /// `t`
    Triton,
    /// `s`
    Helion,
    /// `a`
    Alpha,
    /// `#`
    HeavyIon,
}

impl Particle {
    /// The card symbol for this particle
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Neutron => "n",
            Self::AntiNeutron => "q",
            Self::Photon => "p",
            Self::Electron => "e",
            Self::Positron => "f",
            Self::MuonMinus => "|",
            Self::MuonPlus => "!",
            Self::ElectronNeutrino => "u",
            Self::AntiElectronNeutrino => "<",
            Self::MuonNeutrino => "v",
            Self::AntiMuonNeutrino => ">",
            Self::Proton => "h",
            Self::AntiProton => "g",
            Self::Lambda => "l",
            Self::AntiLambda => "b",
            Self::SigmaPlus => "+",
            Self::AntiSigmaPlus => "_",
            Self::SigmaMinus => "-",
            Self::AntiSigmaMinus => "~",
            Self::Xi0 => "x",
            Self::AntiXi0 => "c",
            Self::XiMinus => "y",
            Self::XiPlus => "w",
            Self::Omega => "o",
            Self::AntiOmega => "@",
            Self::PionPlus => "/",
            Self::PionMinus => "*",
            Self::Pion0 => "z",
            Self::KaonPlus => "k",
            Self::KaonMinus => "?",
            Self::KaonShort => "%",
            Self::KaonLong => "^",
            Self::Deuteron => "d",
            Self::Triton => "t",
            Self::Helion => "s",
            Self::Alpha => "a",
            Self::HeavyIon => "#",
        }
    }

    /// Human-readable lower-case name, e.g. `neutron`
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Neutron => "neutron",
            Self::AntiNeutron => "anti-neutron",
            Self::Photon => "photon",
            Self::Electron => "electron",
            Self::Positron => "positron",
            Self::MuonMinus => "negative muon",
            Self::MuonPlus => "positive muon",
            Self::ElectronNeutrino => "electron neutrino",
            Self::AntiElectronNeutrino => "anti-electron neutrino",
            Self::MuonNeutrino => "muon neutrino",
            Self::AntiMuonNeutrino => "anti-muon neutrino",
            Self::Proton => "proton",
            Self::AntiProton => "anti-proton",
            Self::Lambda => "lambda baryon",
            Self::AntiLambda => "anti-lambda baryon",
            Self::SigmaPlus => "positive sigma baryon",
            Self::AntiSigmaPlus => "anti positive sigma baryon",
            Self::SigmaMinus => "negative sigma baryon",
            Self::AntiSigmaMinus => "anti negative sigma baryon",
            Self::Xi0 => "cascade baryon",
            Self::AntiXi0 => "anti cascade baryon",
            Self::XiMinus => "negative cascade baryon",
            Self::XiPlus => "positive cascade baryon",
            Self::Omega => "omega baryon",
            Self::AntiOmega => "anti omega baryon",
            Self::PionPlus => "positive pion",
            Self::PionMinus => "negative pion",
            Self::Pion0 => "neutral pion",
            Self::KaonPlus => "positive kaon",
            Self::KaonMinus => "negative kaon",
            Self::KaonShort => "short kaon",
            Self::KaonLong => "long kaon",
            Self::Deuteron => "deuteron",
            Self::Triton => "triton",
            Self::Helion => "helion",
            Self::Alpha => "alpha",
            Self::HeavyIon => "heavy ion",
        }
    }

    /// The fixed symbol table, in MCNP6 manual order
    const TABLE: [Particle; 37] = [
        Self::Neutron,
        Self::AntiNeutron,
        Self::Photon,
        Self::Electron,
        Self::Positron,
        Self::MuonMinus,
        Self::MuonPlus,
        Self::ElectronNeutrino,
        Self::AntiElectronNeutrino,
        Self::MuonNeutrino,
        Self::AntiMuonNeutrino,
        Self::Proton,
        Self::AntiProton,
        Self::Lambda,
        Self::AntiLambda,
        Self::SigmaPlus,
        Self::AntiSigmaPlus,
        Self::SigmaMinus,
        Self::AntiSigmaMinus,
        Self::Xi0,
        Self::AntiXi0,
        Self::XiMinus,
        Self::XiPlus,
        Self::Omega,
        Self::AntiOmega,
        Self::PionPlus,
        Self::PionMinus,
        Self::Pion0,
        Self::KaonPlus,
        Self::KaonMinus,
        Self::KaonShort,
        Self::KaonLong,
        Self::Deuteron,
        Self::Triton,
        Self::Helion,
        Self::Alpha,
        Self::HeavyIon,
    ];
}

impl TryFrom<&str> for Particle {
    type Error = Error;

    /// Match a single particle code against the fixed enumeration
    fn try_from(symbol: &str) -> Result<Self> {
        Self::TABLE
            .into_iter()
            .find(|p| p.symbol() == symbol)
            .ok_or_else(|| Error::syntax("a particle symbol", symbol))
    }
}

impl std::fmt::Display for Particle {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{}", self.symbol())
    }
}

/// Ordered particle list from a card's `:<designator>` segment
///
/// Parses a comma-separated list of codes from the fixed enumeration.
/// Renders by re-joining with commas in the original order; the order is
/// semantically meaningful, so it is neither sorted nor deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Designator {
    particles: Vec<Particle>,
}

impl Designator {
    /// The particles in card order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Construct from an already-typed particle list
    ///
    /// Fails if the list is empty; a designator always names at least one
    /// particle.
    pub fn new(particles: Vec<Particle>) -> Result<Self> {
        if particles.is_empty() {
            return Err(Error::syntax("a particle designator", ""));
        }
        Ok(Self { particles })
    }
}

impl std::str::FromStr for Designator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let particles = s
            .split(',')
            .map(Particle::try_from)
            .collect::<Result<Vec<Particle>>>()
            .map_err(|_| Error::syntax("a particle designator", s))?;
        Self::new(particles)
    }
}

impl std::fmt::Display for Designator {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{}", self.particles.iter().join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("n", Particle::Neutron)]
    #[case("p", Particle::Photon)]
    #[case("#", Particle::HeavyIon)]
    #[case("|", Particle::MuonMinus)]
    fn particle_symbols(#[case] symbol: &str, #[case] expected: Particle) {
        assert_eq!(Particle::try_from(symbol).unwrap(), expected);
        assert_eq!(expected.to_string(), symbol);
    }

    #[test]
    fn particle_table_is_complete() {
        assert_eq!(Particle::TABLE.len(), 37);
    }

    #[rstest]
    #[case("zz")]
    #[case("1")]
    #[case("")]
    fn reject_unknown_symbols(#[case] symbol: &str) {
        assert!(Particle::try_from(symbol).is_err());
    }

    // order is meaningful, so it must be preserved exactly
    #[test]
    fn designator_order_preserved() {
        let designator = "n,p,e".parse::<Designator>().unwrap();
        assert_eq!(
            designator.particles(),
            [Particle::Neutron, Particle::Photon, Particle::Electron]
        );
        assert_eq!(designator.to_string(), "n,p,e");
    }

    #[test]
    fn designator_keeps_duplicates() {
        let designator = "n,n".parse::<Designator>().unwrap();
        assert_eq!(designator.to_string(), "n,n");
    }

    #[rstest]
    #[case("n,zz")]
    #[case("n,,p")]
    #[case("")]
    fn designator_rejects(#[case] text: &str) {
        assert!(matches!(
            text.parse::<Designator>(),
            Err(Error::Syntax { .. })
        ));
    }
}
