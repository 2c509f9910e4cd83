//! The registered data-card schemas
//!
//! One schema per card type, declared as static data and registered into the
//! global table on first use. The set covers one card of every interesting
//! shape: suffixed cards, designator cards, tuple cards, enumerated-text
//! options, shorthand-heavy cards, and the `sdef` keyword block. The full
//! MCNP card catalogue is hundreds of entries of exactly these shapes, so
//! extending the table is a matter of adding rows, not code.

// internal modules
use super::{CellKind, Constraint, FieldSpec, Presence, Schema};
use crate::token::Delimiters;

/// Highest tally/cell/surface style suffix MCNP accepts
const MAX_SUFFIX: i64 = 99_999_999;

/// Standard tally types are 1, 2, 4, 6, 7, and 8 plus any decade
fn is_tally_type(suffix: i64) -> bool {
    matches!(suffix % 10, 1 | 2 | 4 | 6 | 7 | 8)
}

pub(super) const SCHEMAS: &[Schema] = &[
    // tally cell flagging, e.g. `cf3 10 20 30`
    Schema {
        mnemonic: "cf",
        suffix: Presence::Required,
        suffix_constraint: Some(Constraint::IntRange(1, MAX_SUFFIX)),
        designator: Presence::Forbidden,
        fields: &[FieldSpec::required("numbers", CellKind::Tuple(&CellKind::Integer))],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    },
    // material substitution, e.g. `mx5:n 1001 8016`
    Schema {
        mnemonic: "mx",
        suffix: Presence::Required,
        suffix_constraint: Some(Constraint::IntRange(1, MAX_SUFFIX)),
        designator: Presence::Required,
        fields: &[FieldSpec::required("zaids", CellKind::Tuple(&CellKind::Nuclide))],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    },
    // total fission nu control, `totnu` or `totnu no`
    Schema {
        mnemonic: "totnu",
        suffix: Presence::Forbidden,
        suffix_constraint: None,
        designator: Presence::Forbidden,
        fields: &[FieldSpec::optional("no", CellKind::Text).check(Constraint::OneOf(&["no"]))],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    },
    // tally definition, e.g. `f4:n 1 2 3`
    Schema {
        mnemonic: "f",
        suffix: Presence::Required,
        suffix_constraint: Some(Constraint::IntCheck(is_tally_type, "a standard tally type")),
        designator: Presence::Optional,
        fields: &[FieldSpec::required("regions", CellKind::Tuple(&CellKind::Integer))],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    },
    // tally energy bins, e.g. `e0 0.1 99i 10.0`
    Schema {
        mnemonic: "e",
        suffix: Presence::Required,
        suffix_constraint: Some(Constraint::IntRange(0, MAX_SUFFIX)),
        designator: Presence::Forbidden,
        fields: &[FieldSpec::required("bounds", CellKind::Tuple(&CellKind::Real))
            .check(Constraint::RealRange(0.0, f64::INFINITY))],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    },
    // cell importances, e.g. `imp:n 1 1 0`
    Schema {
        mnemonic: "imp",
        suffix: Presence::Forbidden,
        suffix_constraint: None,
        designator: Presence::Required,
        fields: &[FieldSpec::required("importances", CellKind::Tuple(&CellKind::Real))
            .check(Constraint::RealRange(0.0, f64::INFINITY))],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    },
    // cell volumes
    Schema {
        mnemonic: "vol",
        suffix: Presence::Forbidden,
        suffix_constraint: None,
        designator: Presence::Forbidden,
        fields: &[FieldSpec::required("volumes", CellKind::Tuple(&CellKind::Real))
            .check(Constraint::RealRange(0.0, f64::INFINITY))],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    },
    // cutoffs with jump-heavy entries, e.g. `cut:n j 0.0`
    Schema {
        mnemonic: "cut",
        suffix: Presence::Forbidden,
        suffix_constraint: None,
        designator: Presence::Required,
        fields: &[FieldSpec::required("cutoffs", CellKind::Tuple(&CellKind::Real))],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    },
    // transport mode, e.g. `mode n p`
    Schema {
        mnemonic: "mode",
        suffix: Presence::Forbidden,
        suffix_constraint: None,
        designator: Presence::Forbidden,
        fields: &[FieldSpec::required("particles", CellKind::Tuple(&CellKind::Designator))],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    },
    // source information, e.g. `si5 h 1 2 3` or `si8 s d1 d2`
    Schema {
        mnemonic: "si",
        suffix: Presence::Required,
        suffix_constraint: Some(Constraint::IntRange(1, 999)),
        designator: Presence::Forbidden,
        fields: &[
            FieldSpec::optional("option", CellKind::Text)
                .check(Constraint::OneOf(&["h", "l", "a", "s"])),
            FieldSpec::required("values", CellKind::Tuple(&CellKind::SourceValue)),
        ],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    },
    // source probabilities, e.g. `sp5 d 0.2 0.8`
    Schema {
        mnemonic: "sp",
        suffix: Presence::Required,
        suffix_constraint: Some(Constraint::IntRange(1, 999)),
        designator: Presence::Forbidden,
        fields: &[
            FieldSpec::optional("option", CellKind::Text)
                .check(Constraint::OneOf(&["d", "c", "v", "w"])),
            FieldSpec::required("probabilities", CellKind::Tuple(&CellKind::Real)),
        ],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    },
    // source bias, same shape as sp
    Schema {
        mnemonic: "sb",
        suffix: Presence::Required,
        suffix_constraint: Some(Constraint::IntRange(1, 999)),
        designator: Presence::Forbidden,
        fields: &[
            FieldSpec::optional("option", CellKind::Text)
                .check(Constraint::OneOf(&["d", "c", "v", "w"])),
            FieldSpec::required("biases", CellKind::Tuple(&CellKind::Real)),
        ],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    },
    // dependent source distribution, e.g. `ds2 s d3 d4`
    Schema {
        mnemonic: "ds",
        suffix: Presence::Required,
        suffix_constraint: Some(Constraint::IntRange(1, 999)),
        designator: Presence::Forbidden,
        fields: &[
            FieldSpec::optional("option", CellKind::Text)
                .check(Constraint::OneOf(&["h", "l", "s", "t", "q"])),
            FieldSpec::required("values", CellKind::Tuple(&CellKind::SourceValue)),
        ],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    },
    // the general source keyword block, e.g. `sdef erg=d5 pos=0 0 0`
    Schema {
        mnemonic: "sdef",
        suffix: Presence::Forbidden,
        suffix_constraint: None,
        designator: Presence::Forbidden,
        fields: &[],
        keywords: &[
            FieldSpec::required("cel", CellKind::Integer),
            FieldSpec::required("sur", CellKind::Integer),
            FieldSpec::required("erg", CellKind::SourceValue),
            FieldSpec::required("tme", CellKind::SourceValue),
            FieldSpec::required("dir", CellKind::SourceValue),
            FieldSpec::required("vec", CellKind::Tuple(&CellKind::Real)),
            FieldSpec::required("pos", CellKind::Tuple(&CellKind::Real)),
            FieldSpec::required("axs", CellKind::Tuple(&CellKind::Real)),
            FieldSpec::required("rad", CellKind::SourceValue),
            FieldSpec::required("ext", CellKind::SourceValue),
            FieldSpec::required("par", CellKind::Designator),
            FieldSpec::required("wgt", CellKind::Real),
            FieldSpec::required("nrm", CellKind::Integer),
            FieldSpec::required("eff", CellKind::Real),
            FieldSpec::required("ara", CellKind::Real),
        ],
        delimiters: Delimiters::keyword_value(),
    },
    // coordinate transformation, e.g. `tr2 0 0 10`
    Schema {
        mnemonic: "tr",
        suffix: Presence::Required,
        suffix_constraint: Some(Constraint::IntRange(1, 999)),
        designator: Presence::Forbidden,
        fields: &[FieldSpec::required("entries", CellKind::Tuple(&CellKind::Real))],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    },
    // history cutoff, e.g. `nps 1000000`
    Schema {
        mnemonic: "nps",
        suffix: Presence::Forbidden,
        suffix_constraint: None,
        designator: Presence::Forbidden,
        fields: &[
            FieldSpec::required("npp", CellKind::Integer)
                .check(Constraint::IntRange(1, i64::MAX)),
            FieldSpec::optional("npsmg", CellKind::Integer),
        ],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    },
    // print-and-dump cycle, jumps are common, e.g. `prdmp j j 1`
    Schema {
        mnemonic: "prdmp",
        suffix: Presence::Forbidden,
        suffix_constraint: None,
        designator: Presence::Forbidden,
        fields: &[FieldSpec::required("controls", CellKind::Tuple(&CellKind::Integer))],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    },
    // criticality source, e.g. `kcode 5000 1.0 50 250`
    Schema {
        mnemonic: "kcode",
        suffix: Presence::Forbidden,
        suffix_constraint: None,
        designator: Presence::Forbidden,
        fields: &[FieldSpec::required("settings", CellKind::Tuple(&CellKind::Real))],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    },
    // criticality source points
    Schema {
        mnemonic: "ksrc",
        suffix: Presence::Forbidden,
        suffix_constraint: None,
        designator: Presence::Forbidden,
        fields: &[FieldSpec::required("locations", CellKind::Tuple(&CellKind::Real))],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    },
    // thermal scattering library, e.g. `mt1 lwtr.10t`
    Schema {
        mnemonic: "mt",
        suffix: Presence::Required,
        suffix_constraint: Some(Constraint::IntRange(1, MAX_SUFFIX)),
        designator: Presence::Forbidden,
        fields: &[FieldSpec::required("identifier", CellKind::Text)],
        keywords: &[],
        delimiters: Delimiters::whitespace(),
    },
];

#[cfg(test)]
mod tests {
    use crate::card::cell::{Cell, DistributionRef, IntegerCell, RealCell};
    use crate::card::particle::Particle;
    use crate::error::Error;
    use crate::schema::parse_card;

    // tally cell flagging with an integer suffix and integer tuple
    #[test]
    fn scenario_cell_flagging() {
        let record = parse_card("cf3 10 20 30").unwrap();
        assert_eq!(record.suffix(), Some(3));
        assert_eq!(
            record.get("numbers"),
            Some(&Cell::Tuple(vec![
                Cell::Integer(IntegerCell::Value(10)),
                Cell::Integer(IntegerCell::Value(20)),
                Cell::Integer(IntegerCell::Value(30)),
            ]))
        );
        assert_eq!(record.to_string(), "cf3 10 20 30");
    }

    // material substitution with a designator and ZAID tuple
    #[test]
    fn scenario_material_substitution() {
        let record = parse_card("mx5:n 1001 8016").unwrap();
        assert_eq!(record.suffix(), Some(5));
        assert_eq!(
            record.designator().unwrap().particles(),
            [Particle::Neutron]
        );

        let Some(Cell::Tuple(zaids)) = record.get("zaids") else {
            panic!("expected nuclide tuple")
        };
        let Cell::Nuclide(first) = &zaids[0] else {
            panic!("expected nuclide")
        };
        assert_eq!((first.z(), first.a()), (1, 1));
        let Cell::Nuclide(second) = &zaids[1] else {
            panic!("expected nuclide")
        };
        assert_eq!((second.z(), second.a()), (8, 16));

        assert_eq!(record.to_string(), "mx5:n 1001 8016");
    }

    // optional field present, absent, and both round-tripping
    #[test]
    fn scenario_optional_field() {
        let record = parse_card("totnu no").unwrap();
        assert_eq!(record.get("no"), Some(&Cell::Text("no".to_string())));
        assert_eq!(record.to_string(), "totnu no");

        let record = parse_card("totnu").unwrap();
        assert_eq!(record.get("no"), None);
        assert_eq!(record.to_string(), "totnu");
    }

    #[test]
    fn tally_type_predicate() {
        assert!(parse_card("f4:n 1 2").is_ok());
        assert!(parse_card("f14:p 1").is_ok());
        match parse_card("f3:n 1") {
            Err(Error::Semantics { field, .. }) => assert_eq!(field, "suffix"),
            other => panic!("expected suffix error, got {other:?}"),
        }
    }

    #[test]
    fn source_keyword_block() {
        let record = parse_card("sdef erg=d5 pos=0 0 0 wgt=2.0 par=n").unwrap();
        assert_eq!(
            record.get("erg"),
            Some(&Cell::Distribution(DistributionRef { number: 5 }))
        );
        assert_eq!(record.get("wgt"), Some(&Cell::Real(RealCell::Value(2.0))));
        assert_eq!(
            record.get("pos"),
            Some(&Cell::Tuple(vec![
                Cell::Real(RealCell::Value(0.0)),
                Cell::Real(RealCell::Value(0.0)),
                Cell::Real(RealCell::Value(0.0)),
            ]))
        );
        assert_eq!(record.to_string(), "sdef erg=d5 pos=0 0 0 wgt=2 par=n");
    }

    #[test]
    fn source_block_rejects_unknown_keyword() {
        assert!(matches!(
            parse_card("sdef erg=14 frq=2"),
            Err(Error::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn source_block_rejects_duplicates() {
        assert!(matches!(
            parse_card("sdef erg=14 erg=15"),
            Err(Error::Semantics { .. })
        ));
    }

    #[test]
    fn distribution_options_take_references() {
        let record = parse_card("ds2 s d3 d4").unwrap();
        assert_eq!(record.get("option"), Some(&Cell::Text("s".to_string())));
        assert_eq!(
            record.get("values"),
            Some(&Cell::Tuple(vec![
                Cell::Distribution(DistributionRef { number: 3 }),
                Cell::Distribution(DistributionRef { number: 4 }),
            ]))
        );
        assert_eq!(record.to_string(), "ds2 s d3 d4");
    }

    #[test]
    fn cutoffs_keep_jumps() {
        let record = parse_card("cut:n j 0.0").unwrap();
        assert_eq!(record.identity(), "cut:n");
        assert_eq!(record.to_string(), "cut:n j 0");
    }

    #[test]
    fn mode_lists_particles() {
        let record = parse_card("mode n p").unwrap();
        assert_eq!(record.to_string(), "mode n p");
    }

    #[test]
    fn negative_importance_is_semantic() {
        match parse_card("imp:n 1 -1 0") {
            Err(Error::Semantics { field, .. }) => assert_eq!(field, "importances"),
            other => panic!("expected semantic error, got {other:?}"),
        }
    }

    #[test]
    fn case_insensitive_input() {
        let record = parse_card("CF3 10 20 30").unwrap();
        assert_eq!(record.to_string(), "cf3 10 20 30");
    }
}
