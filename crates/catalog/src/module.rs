//! Catalog entries.

use catalog_widgets::list::Item;

/// One module offered by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub description: String,
    /// Where the module's source lives.
    pub url: String,
    /// Long-form documentation shown on the module page.
    pub readme: String,
}

impl Module {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        readme: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
            readme: readme.into(),
        }
    }
}

impl Item for Module {
    fn filter_value(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        (!self.description.is_empty()).then_some(self.description.as_str())
    }
}

/// A small built-in catalog for the `catalog` binary.
pub fn demo_modules() -> Vec<Module> {
    vec![
        Module::new(
            "vpc",
            "Network with public and private subnets across availability zones",
            "https://example.com/modules/vpc",
            "# VPC\n\nCreates a VPC with public and private subnets.\n\n\
             ## Inputs\n\n- cidr_block\n- availability_zones\n- enable_nat_gateway\n\n\
             ## Outputs\n\n- vpc_id\n- public_subnet_ids\n- private_subnet_ids\n",
        ),
        Module::new(
            "eks-cluster",
            "Managed Kubernetes control plane with node groups",
            "https://example.com/modules/eks-cluster",
            "# EKS cluster\n\nProvisions a control plane and managed node groups.\n\n\
             ## Inputs\n\n- cluster_name\n- kubernetes_version\n- node_groups\n\n\
             ## Outputs\n\n- cluster_endpoint\n- cluster_security_group_id\n",
        ),
        Module::new(
            "rds-postgres",
            "PostgreSQL database with automated backups",
            "https://example.com/modules/rds-postgres",
            "# RDS PostgreSQL\n\nRuns a PostgreSQL instance.\n\n\
             ## Inputs\n\n- engine_version\n- instance_class\n- backup_retention_days\n\n\
             ## Outputs\n\n- endpoint\n- port\n",
        ),
        Module::new(
            "s3-bucket",
            "Versioned, encrypted object storage bucket",
            "https://example.com/modules/s3-bucket",
            "# S3 bucket\n\nCreates a private bucket with versioning and SSE.\n\n\
             ## Inputs\n\n- bucket_name\n- lifecycle_rules\n\n## Outputs\n\n- bucket_arn\n",
        ),
        Module::new(
            "iam-role",
            "Role with an assume-role policy and attached managed policies",
            "https://example.com/modules/iam-role",
            "# IAM role\n\n## Inputs\n\n- name\n- trusted_principals\n- policy_arns\n\n\
             ## Outputs\n\n- role_arn\n",
        ),
    ]
}
