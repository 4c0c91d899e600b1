//! AWS machine provider config (`AWSMachineProviderConfig`)
//!
//! This is the `machine.openshift.io/v1beta1` schema generation, embedded as
//! the opaque `providerSpec.value` of a Machine. Resource references here are
//! presence-only: whichever field is populated decides what is referenced.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::SecretReference;

/// `kind` discriminator of an AWS provider spec
pub const AWS_PROVIDER_CONFIG_KIND: &str = "AWSMachineProviderConfig";

/// AWS provider config for a single machine
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AwsMachineProviderConfig {
    /// Type discriminator (`AWSMachineProviderConfig`)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    /// API version of the payload
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    /// AMI to boot from
    #[serde(default)]
    pub ami: AwsResourceReference,

    /// EC2 instance type (e.g., "m6i.xlarge")
    #[serde(default)]
    pub instance_type: String,

    /// Tags applied to the instance
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TagSpecification>,

    /// IAM instance profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iam_instance_profile: Option<AwsResourceReference>,

    /// Secret holding the ignition user data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data_secret: Option<SecretReference>,

    /// Secret holding the cloud credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_secret: Option<SecretReference>,

    /// SSH key pair name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,

    /// Network interface device index
    #[serde(default)]
    pub device_index: i64,

    /// Whether to assign a public IP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_ip: Option<bool>,

    /// Security groups attached to the instance
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security_groups: Vec<AwsResourceReference>,

    /// Subnet the instance is launched into
    #[serde(default)]
    pub subnet: AwsResourceReference,

    /// Region and zone placement
    #[serde(default)]
    pub placement: Placement,

    /// Load balancers to register the instance with
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub load_balancers: Vec<LoadBalancerReference>,

    /// Block device mappings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub block_devices: Vec<BlockDeviceMappingSpec>,

    /// Fields not modelled above, carried through re-encoding unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Reference to an AWS resource, identified by whichever field is populated
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AwsResourceReference {
    /// Resource ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Amazon Resource Name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,

    /// Describe filters; an explicitly empty list is kept distinct from none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<Filter>>,

    /// Fields not modelled above, carried through re-encoding unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A describe filter in the presence-only schema
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// Filter name, e.g. "tag:Name"
    pub name: String,

    /// Accepted values
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,

    /// Fields not modelled above, carried through re-encoding unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Where the instance is placed
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Region, e.g. "us-east-1"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub region: String,

    /// Availability zone, e.g. "us-east-1a"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub availability_zone: String,

    /// Instance tenancy ("default", "dedicated", "host")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tenancy: String,

    /// Fields not modelled above, carried through re-encoding unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Instance tag
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct TagSpecification {
    /// Tag key
    pub name: String,
    /// Tag value
    pub value: String,
    /// Any other fields, kept as decoded
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Load balancer the instance is registered with
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct LoadBalancerReference {
    /// Load balancer name
    pub name: String,
    /// "classic" or "network"
    #[serde(rename = "type")]
    pub type_: String,
    /// Any other fields, kept as decoded
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Block device mapping
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlockDeviceMappingSpec {
    /// Device name, e.g. "/dev/xvda"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,

    /// EBS volume parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ebs: Option<EbsBlockDeviceSpec>,

    /// Fields not modelled above, carried through re-encoding unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// EBS volume parameters
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EbsBlockDeviceSpec {
    /// Volume size in GiB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_size: Option<i64>,

    /// Volume type, e.g. "gp3"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_type: Option<String>,

    /// Whether the volume is encrypted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<bool>,

    /// KMS key used for encryption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kms_key: Option<AwsResourceReference>,

    /// Fields not modelled above, carried through re-encoding unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_openshift_style_provider_spec() {
        let json = serde_json::json!({
            "apiVersion": "machine.openshift.io/v1beta1",
            "kind": "AWSMachineProviderConfig",
            "ami": { "id": "ami-0123456789" },
            "instanceType": "m6i.xlarge",
            "placement": { "region": "us-east-1", "availabilityZone": "us-east-1a" },
            "subnet": {
                "filters": [{ "name": "tag:Name", "values": ["aws-subnet-12345678"] }]
            },
            "metadata": { "creationTimestamp": null }
        });

        let config: AwsMachineProviderConfig =
            serde_json::from_value(json).expect("provider spec should decode");
        assert_eq!(config.kind, AWS_PROVIDER_CONFIG_KIND);
        assert_eq!(config.placement.availability_zone, "us-east-1a");
        assert_eq!(config.ami.id.as_deref(), Some("ami-0123456789"));
        assert_eq!(config.subnet.filters.as_ref().map(Vec::len), Some(1));
        assert!(config.subnet.id.is_none());
        assert!(config.extra.contains_key("metadata"));
    }

    #[test]
    fn unmodelled_fields_survive_re_encoding() {
        let json = serde_json::json!({
            "apiVersion": "machine.openshift.io/v1beta1",
            "kind": "AWSMachineProviderConfig",
            "ami": { "id": "ami-0123456789" },
            "instanceType": "m6i.xlarge",
            "deviceIndex": 0,
            "placement": {
                "region": "us-east-1",
                "availabilityZone": "us-east-1a",
                "hostPlacement": { "affinity": "Default" }
            },
            "subnet": {
                "filters": [{ "name": "tag:Name", "values": ["aws-subnet-12345678"] }]
            },
            "blockDevices": [{
                "deviceName": "/dev/xvda",
                "ebs": { "volumeSize": 120, "volumeType": "gp3", "iops": 3000 }
            }],
            "spotMarketOptions": { "maxPrice": "0.5" },
            "metadataServiceOptions": { "authentication": "Required" },
            "networkInterfaceType": "EFA",
            "placementGroupName": "cpms-pg",
            "metadata": { "creationTimestamp": null }
        });

        let config: AwsMachineProviderConfig =
            serde_json::from_value(json.clone()).expect("provider spec should decode");
        assert_eq!(
            config.extra.get("networkInterfaceType"),
            Some(&serde_json::json!("EFA"))
        );
        assert_eq!(
            serde_json::to_value(&config).expect("provider spec should encode"),
            json
        );
    }

    #[test]
    fn empty_reference_is_omitted_fields() {
        let reference = AwsResourceReference::default();
        assert_eq!(
            serde_json::to_value(&reference).expect("reference should serialize"),
            serde_json::json!({})
        );
    }

    #[test]
    fn explicit_empty_filters_are_kept() {
        let reference: AwsResourceReference =
            serde_json::from_value(serde_json::json!({ "filters": [] }))
                .expect("reference should decode");
        assert_eq!(reference.filters, Some(Vec::new()));
        assert_eq!(
            serde_json::to_value(&reference).expect("reference should serialize"),
            serde_json::json!({ "filters": [] })
        );
    }
}
