//! Migration notes shown next to each rewritten call

use serde::Serialize;
use std::fmt;

const WORK_POOLS_DOCS: &str = "https://docs.prefect.io/latest/concepts/work-pools/";
const SERVING_DOCS: &str =
    "https://docs.prefect.io/latest/concepts/deployments/#serving-flows-on-long-lived-infrastructure";

/// Manual follow-up the user should know about
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// No infrastructure block, so the call became `<flow>.serve()`
    ServeMigration { subject: String },
    /// Infrastructure block replaced by a work pool
    WorkPoolMigration,
    /// `image=` synthesized from the infrastructure block
    ImageConfiguration { image: String },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::ServeMigration { subject } => write!(
                f,
                "Your `Deployment.build_from_flow` call was migrated to a `{subject}.serve()` \
                 call because your script does not use an infrastructure block. You can use \
                 `flow.serve` to create a deployment for your flow and poll for and execute \
                 scheduled runs. To learn more about serving flows, see {SERVING_DOCS}"
            ),
            Advisory::WorkPoolMigration => write!(
                f,
                "When deploying flows with `flow.deploy`, work pools replace infrastructure \
                 blocks as the source of infrastructure configuration. To migrate from an \
                 infrastructure block to a work pool, publish your infrastructure as a work \
                 pool by calling the `.publish_as_work_pool()` method on your infrastructure \
                 block and pass the name of the new work pool to the `work_pool_name` keyword \
                 argument of the `.deploy()` method. To learn more about work pools, see \
                 {WORK_POOLS_DOCS}"
            ),
            Advisory::ImageConfiguration { image } => write!(
                f,
                "Your infrastructure block is configured with the image `{image}`, so an \
                 `image=\"{image}\"` argument was added to the `.deploy()` call. `flow.deploy` \
                 builds and pushes this image by default; pass `build=False` and `push=False` \
                 if the image already exists in your registry."
            ),
        }
    }
}
