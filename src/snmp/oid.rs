use snmp2::Oid;

use super::WalkError;

/// Splits a dotted OID string into its numeric arcs.
pub fn parse_arcs(s: &str) -> Result<Vec<u64>, WalkError> {
    let parts: Result<Vec<u64>, _> = s
        .trim()
        .split('.')
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<u64>())
        .collect();

    let parts = parts.map_err(|e| WalkError::InvalidOid {
        oid: s.to_string(),
        reason: e.to_string(),
    })?;

    if parts.is_empty() {
        return Err(WalkError::InvalidOid {
            oid: s.to_string(),
            reason: "no components".to_string(),
        });
    }
    Ok(parts)
}

/// Parses a dotted OID string such as `1.3.6.1.4.1.318.1.1.10.4.2.3.1.3`.
pub fn parse_oid(s: &str) -> Result<Oid<'static>, WalkError> {
    let parts = parse_arcs(s)?;

    Oid::from(&parts).map_err(|e| WalkError::InvalidOid {
        oid: s.to_string(),
        reason: format!("{:?}", e),
    })
}

pub fn format_arcs(arcs: &[u64]) -> String {
    arcs.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dotted_oid() {
        let oid = parse_oid("1.3.6.1.4.1.318.1.1.10.4.2.3.1.3").unwrap();
        let expected = Oid::from(&[1, 3, 6, 1, 4, 1, 318, 1, 1, 10, 4, 2, 3, 1, 3]).unwrap();
        assert_eq!(oid, expected);
    }

    #[test]
    fn tolerates_leading_dot_and_whitespace() {
        let oid = parse_oid(" .1.3.6.1.2.1.1.2.0 ").unwrap();
        assert_eq!(oid, Oid::from(&[1, 3, 6, 1, 2, 1, 1, 2, 0]).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_oid("1.3.six.1").unwrap_err();
        assert!(matches!(err, WalkError::InvalidOid { .. }));
        assert!(err.to_string().contains("1.3.six.1"));
    }

    #[test]
    fn arcs_round_trip_through_dotted_form() {
        let arcs = parse_arcs("1.3.6.1.4.1.318").unwrap();
        assert_eq!(arcs, vec![1, 3, 6, 1, 4, 1, 318]);
        assert_eq!(format_arcs(&arcs), "1.3.6.1.4.1.318");
    }

    #[test]
    fn rejects_empty() {
        assert!(parse_oid("").is_err());
        assert!(parse_oid("...").is_err());
    }
}
