// grater-core/src/infrastructure/templates/mod.rs

// Turns validated settings into the text of every generated artifact. The
// templates are compiled into the binary; only values are substituted.

use minijinja::{AutoEscape, Environment, UndefinedBehavior, context};
use uuid::Uuid;

use crate::domain::config::{GlobalSettings, ProjectSettings};
use crate::infrastructure::error::InfrastructureError;
use crate::ports::Reporter;

const DATA_CONTEXT: &str = "data_context.yml";
const BUILD_SCRIPT: &str = "build_image.sh";
const BUCKET_VARS: &str = "buckets.tfvars";
const LAMBDA_VARS: &str = "lambda.tfvars";
const PROVIDER: &str = "provider.tf";

const TEMPLATES: [(&str, &str); 5] = [
    (DATA_CONTEXT, include_str!("data_context.yml.j2")),
    (BUILD_SCRIPT, include_str!("build_image.sh.j2")),
    (BUCKET_VARS, include_str!("buckets.tfvars.j2")),
    (LAMBDA_VARS, include_str!("lambda.tfvars.j2")),
    (PROVIDER, include_str!("provider.tf.j2")),
];

/// The two Terraform variable files of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerraformVars {
    /// `terraform/buckets/<project>.auto.tfvars`
    pub buckets: String,
    /// `terraform/lambda/<project>.auto.tfvars`: the bucket variables plus `image_uri`.
    pub lambda: String,
}

pub struct ArtifactRenderer<'r> {
    env: Environment<'static>,
    reporter: &'r dyn Reporter,
}

impl<'r> ArtifactRenderer<'r> {
    pub fn new(reporter: &'r dyn Reporter) -> Result<Self, InfrastructureError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);

        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }

        Ok(Self { env, reporter })
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> Result<String, InfrastructureError> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?)
    }

    /// `great_expectations.yml` with a freshly generated `data_context_id`.
    ///
    /// The id is a random v4 UUID used for anonymous usage statistics, so two
    /// renders of the same settings differ in that field and nowhere else. It
    /// is the only non-deterministic output of the whole pipeline.
    pub fn data_context_config(
        &self,
        project: &ProjectSettings,
    ) -> Result<String, InfrastructureError> {
        self.data_context_config_with_id(project, Uuid::new_v4())
    }

    pub fn data_context_config_with_id(
        &self,
        project: &ProjectSettings,
        data_context_id: Uuid,
    ) -> Result<String, InfrastructureError> {
        self.reporter
            .info("Generating Great Expectations configuration file");
        self.render(
            DATA_CONTEXT,
            context! {
                project => project,
                data_context_id => data_context_id.to_string(),
            },
        )
    }

    /// Bash script that builds the project image and pushes it to ECR.
    ///
    /// `AWS_DEFAULT_REGION` is exported as `eu-west-1` whatever `region` says,
    /// while the ECR login and endpoint use `region`. Kept as-is until the
    /// intended behaviour is confirmed.
    pub fn build_script(
        &self,
        project: &ProjectSettings,
        global: &GlobalSettings,
    ) -> Result<String, InfrastructureError> {
        self.reporter
            .info("Generating bash script for making docker image and uploading it to ECR");
        self.render(
            BUILD_SCRIPT,
            context! {
                image => &project.docker_image_name,
                region => &global.region,
                registry => global.registry_endpoint(),
            },
        )
    }

    pub fn terraform_vars(
        &self,
        project: &ProjectSettings,
        global: &GlobalSettings,
    ) -> Result<TerraformVars, InfrastructureError> {
        self.reporter.info("Generating Terraform variable files");
        let ctx = context! {
            project => project,
            image_uri => global.image_uri(&project.docker_image_name),
        };
        Ok(TerraformVars {
            buckets: self.render(BUCKET_VARS, ctx.clone())?,
            lambda: self.render(LAMBDA_VARS, ctx)?,
        })
    }

    /// Provider block written once into every Terraform directory of a project.
    pub fn terraform_provider(&self, global: &GlobalSettings) -> Result<String, InfrastructureError> {
        self.reporter.info("Generating Terraform provider configuration");
        self.render(PROVIDER, context! { region => &global.region })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::validation::tests::RecordingReporter;
    use anyhow::Result;

    fn project() -> ProjectSettings {
        ProjectSettings {
            store_bucket: "b1".to_string(),
            store_bucket_prefix: "ge".to_string(),
            site_bucket: "b2".to_string(),
            site_bucket_prefix: String::new(),
            docker_image_name: "myimg".to_string(),
            site_name: "sales_site".to_string(),
            expectations_suite_name: "sales_suite".to_string(),
            checkpoint_name: "sales_checkpoint".to_string(),
            run_name_template: "%Y%m%d-sales".to_string(),
            data_bucket: "b3".to_string(),
            prefix_data: "raw/".to_string(),
        }
    }

    fn global() -> GlobalSettings {
        GlobalSettings {
            account_id: "123456789012".to_string(),
            region: "eu-west-1".to_string(),
        }
    }

    fn yaml_str<'v>(doc: &'v serde_yaml::Value, path: &[&str]) -> Option<&'v str> {
        path.iter()
            .try_fold(doc, |node, key| node.get(*key))
            .and_then(|v| v.as_str())
    }

    #[test]
    fn test_build_script_references_registry_and_image() -> Result<()> {
        let reporter = RecordingReporter::default();
        let renderer = ArtifactRenderer::new(&reporter)?;
        let script = renderer.build_script(&project(), &global())?;

        assert!(script.starts_with("#!/bin/bash\n"));
        assert!(script.contains("123456789012.dkr.ecr.eu-west-1.amazonaws.com"));
        assert!(script.contains("docker build -t myimg ."));
        assert!(script.contains("--region eu-west-1 | docker login"));
        assert!(script.contains(
            "docker push 123456789012.dkr.ecr.eu-west-1.amazonaws.com/myimg:latest"
        ));
        Ok(())
    }

    #[test]
    fn test_build_script_login_region_stays_pinned() -> Result<()> {
        let reporter = RecordingReporter::default();
        let renderer = ArtifactRenderer::new(&reporter)?;
        let global = GlobalSettings {
            account_id: "123".to_string(),
            region: "us-east-1".to_string(),
        };
        let script = renderer.build_script(&project(), &global)?;

        assert!(script.contains("export AWS_DEFAULT_REGION=\"eu-west-1\""));
        assert!(script.contains("123.dkr.ecr.us-east-1.amazonaws.com"));
        Ok(())
    }

    #[test]
    fn test_bucket_vars_are_exactly_three_lines() -> Result<()> {
        let reporter = RecordingReporter::default();
        let renderer = ArtifactRenderer::new(&reporter)?;
        let vars = renderer.terraform_vars(&project(), &global())?;

        assert_eq!(
            vars.buckets,
            "ge-bucket-name      = \"b1\"\n\
             ge-site-bucket-name = \"b2\"\n\
             ge-data-bucket-name = \"b3\"\n"
        );
        assert_eq!(vars.buckets.lines().count(), 3);
        Ok(())
    }

    #[test]
    fn test_lambda_vars_extend_bucket_vars() -> Result<()> {
        let reporter = RecordingReporter::default();
        let renderer = ArtifactRenderer::new(&reporter)?;
        let vars = renderer.terraform_vars(&project(), &global())?;

        let extra = vars
            .lambda
            .strip_prefix(vars.buckets.as_str())
            .unwrap_or_default();
        assert_eq!(
            extra,
            "image_uri = \"123456789012.dkr.ecr.eu-west-1.amazonaws.com/myimg:latest\"\n"
        );
        Ok(())
    }

    #[test]
    fn test_provider_block() -> Result<()> {
        let reporter = RecordingReporter::default();
        let renderer = ArtifactRenderer::new(&reporter)?;
        let provider = renderer.terraform_provider(&global())?;

        assert!(provider.contains("source  = \"hashicorp/aws\""));
        assert!(provider.contains("provider \"aws\" {\n  region = \"eu-west-1\"\n}\n"));
        Ok(())
    }

    #[test]
    fn test_deterministic_renderers_are_repeatable() -> Result<()> {
        let reporter = RecordingReporter::default();
        let renderer = ArtifactRenderer::new(&reporter)?;

        assert_eq!(
            renderer.build_script(&project(), &global())?,
            renderer.build_script(&project(), &global())?
        );
        assert_eq!(
            renderer.terraform_vars(&project(), &global())?,
            renderer.terraform_vars(&project(), &global())?
        );
        assert_eq!(
            renderer.terraform_provider(&global())?,
            renderer.terraform_provider(&global())?
        );
        Ok(())
    }

    #[test]
    fn test_data_context_is_valid_yaml_with_store_prefixes() -> Result<()> {
        let reporter = RecordingReporter::default();
        let renderer = ArtifactRenderer::new(&reporter)?;
        let text = renderer.data_context_config(&project())?;
        let doc: serde_yaml::Value = serde_yaml::from_str(&text)?;

        let backend = |store: &str| -> Option<&str> {
            yaml_str(&doc, &["stores", store, "store_backend", "prefix"])
        };
        assert_eq!(backend("expectations_store"), Some("ge/expectations/"));
        assert_eq!(backend("validations_store"), Some("ge/validations/"));
        assert_eq!(backend("checkpoint_store"), Some("ge/checkpoints/"));
        assert_eq!(backend("profiler_store"), Some("ge/profiles/"));
        assert_eq!(
            doc["stores"]["profiler_store"]["store_backend"]["suppress_store_backend_id"],
            serde_yaml::Value::Bool(true)
        );
        assert_eq!(
            yaml_str(&doc, &["stores", "expectations_store", "store_backend", "bucket"]),
            Some("b1")
        );
        assert_eq!(
            yaml_str(&doc, &["data_docs_sites", "sales_site", "store_backend", "bucket"]),
            Some("b2")
        );
        Ok(())
    }

    #[test]
    fn test_data_context_id_is_fresh_v4_uuid() -> Result<()> {
        let reporter = RecordingReporter::default();
        let renderer = ArtifactRenderer::new(&reporter)?;

        let ids: Vec<Uuid> = (0..2)
            .map(|_| -> Result<Uuid> {
                let doc: serde_yaml::Value =
                    serde_yaml::from_str(&renderer.data_context_config(&project())?)?;
                let raw = yaml_str(&doc, &["anonymous_usage_statistics", "data_context_id"])
                    .unwrap_or_default();
                Ok(Uuid::parse_str(raw)?)
            })
            .collect::<Result<_>>()?;

        assert_ne!(ids[0], ids[1]);
        assert!(ids.iter().all(|id| id.get_version_num() == 4));
        Ok(())
    }

    #[test]
    fn test_data_context_with_fixed_id_is_repeatable() -> Result<()> {
        let reporter = RecordingReporter::default();
        let renderer = ArtifactRenderer::new(&reporter)?;
        let id = Uuid::new_v4();

        let first = renderer.data_context_config_with_id(&project(), id)?;
        let second = renderer.data_context_config_with_id(&project(), id)?;
        assert_eq!(first, second);
        assert!(first.contains(&format!("data_context_id: {}", id)));
        Ok(())
    }
}
