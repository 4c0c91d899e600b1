//! AWS resource reference conversion between schema generations
//!
//! Failure domains declare subnets with an explicit `type` discriminator,
//! while the machine provider spec stores them presence-only. Both
//! directions are total and keep every field.

use cpms_common::crd::failure_domains::{AwsResourceFilter, AwsResourceReference};
use cpms_common::crd::providers::aws;

/// Convert a discriminated reference to the presence-only form
///
/// `None` becomes the empty reference.
pub fn to_legacy(reference: Option<&AwsResourceReference>) -> aws::AwsResourceReference {
    match reference {
        None => aws::AwsResourceReference::default(),
        Some(AwsResourceReference::Id { id }) => aws::AwsResourceReference {
            id: Some(id.clone()),
            ..Default::default()
        },
        Some(AwsResourceReference::Arn { arn }) => aws::AwsResourceReference {
            arn: Some(arn.clone()),
            ..Default::default()
        },
        Some(AwsResourceReference::Filters { filters }) => aws::AwsResourceReference {
            filters: Some(
                filters
                    .iter()
                    .map(|f| aws::Filter {
                        name: f.name.clone(),
                        values: f.values.clone(),
                        ..Default::default()
                    })
                    .collect(),
            ),
            ..Default::default()
        },
    }
}

/// Convert a presence-only reference to the discriminated form
///
/// When more than one field is populated the ID wins, then the ARN, then
/// the filters. A present filter list is kept even when empty; a reference
/// with none of the three becomes `None`.
pub fn to_current(reference: &aws::AwsResourceReference) -> Option<AwsResourceReference> {
    if let Some(id) = &reference.id {
        return Some(AwsResourceReference::Id { id: id.clone() });
    }
    if let Some(arn) = &reference.arn {
        return Some(AwsResourceReference::Arn { arn: arn.clone() });
    }
    reference
        .filters
        .as_ref()
        .map(|filters| AwsResourceReference::Filters {
            filters: filters
                .iter()
                .map(|f| AwsResourceFilter {
                    name: f.name.clone(),
                    values: f.values.clone(),
                })
                .collect(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpms_common::fixtures::{filter_subnet, id_subnet, legacy_filter_subnet};
    use rstest::rstest;

    fn arn_subnet() -> AwsResourceReference {
        AwsResourceReference::Arn {
            arn: "arn:aws:ec2:us-east-1:123456789012:subnet/subnet-1".to_string(),
        }
    }

    #[rstest]
    #[case::id(Some(id_subnet("subnet-us-east-1c")))]
    #[case::arn(Some(arn_subnet()))]
    #[case::filters(Some(filter_subnet("aws-subnet-12345678")))]
    #[case::empty_filters(Some(AwsResourceReference::Filters { filters: Vec::new() }))]
    #[case::empty(None)]
    fn test_current_survives_legacy_round_trip(#[case] reference: Option<AwsResourceReference>) {
        let legacy = to_legacy(reference.as_ref());
        assert_eq!(to_current(&legacy), reference);
    }

    #[rstest]
    #[case::id(aws::AwsResourceReference { id: Some("subnet-1".to_string()), ..Default::default() })]
    #[case::arn(aws::AwsResourceReference { arn: Some("arn:aws:ec2:::subnet/1".to_string()), ..Default::default() })]
    #[case::filters(legacy_filter_subnet("aws-subnet-12345678"))]
    #[case::empty_filters(aws::AwsResourceReference { filters: Some(Vec::new()), ..Default::default() })]
    #[case::empty(aws::AwsResourceReference::default())]
    fn test_legacy_survives_current_round_trip(#[case] legacy: aws::AwsResourceReference) {
        let current = to_current(&legacy);
        assert_eq!(to_legacy(current.as_ref()), legacy);
    }

    #[test]
    fn test_filters_convert_field_by_field() {
        let legacy = to_legacy(Some(&filter_subnet("aws-subnet-12345678")));
        let filters = legacy.filters.expect("filters should be set");
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].name, "tag:Name");
        assert_eq!(filters[0].values, vec!["aws-subnet-12345678"]);
        assert!(legacy.id.is_none());
        assert!(legacy.arn.is_none());
    }

    #[test]
    fn test_id_takes_precedence_over_other_fields() {
        let legacy = aws::AwsResourceReference {
            id: Some("subnet-1".to_string()),
            arn: Some("arn:aws:ec2:::subnet/1".to_string()),
            filters: legacy_filter_subnet("ignored").filters,
            ..Default::default()
        };
        assert_eq!(to_current(&legacy), Some(id_subnet("subnet-1")));
    }

    #[test]
    fn test_arn_takes_precedence_over_filters() {
        let legacy = aws::AwsResourceReference {
            arn: Some("arn:aws:ec2:::subnet/1".to_string()),
            filters: legacy_filter_subnet("ignored").filters,
            ..Default::default()
        };
        assert!(matches!(
            to_current(&legacy),
            Some(AwsResourceReference::Arn { arn }) if arn == "arn:aws:ec2:::subnet/1"
        ));
    }

    #[test]
    fn test_explicit_empty_filter_list_is_not_absent() {
        let explicit = aws::AwsResourceReference {
            filters: Some(Vec::new()),
            ..Default::default()
        };
        assert_eq!(
            to_current(&explicit),
            Some(AwsResourceReference::Filters { filters: Vec::new() })
        );
        assert_eq!(to_current(&aws::AwsResourceReference::default()), None);
    }
}
