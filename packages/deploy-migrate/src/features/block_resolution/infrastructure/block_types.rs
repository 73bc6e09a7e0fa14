//! Block class name → block type slug

/// Slugs whose spelling does not follow from the class name
const KNOWN_BLOCK_TYPES: &[(&str, &str)] = &[
    ("GitHub", "github"),
    ("GitHubRepository", "github-repository"),
    ("GitLabRepository", "gitlab-repository"),
    ("BitBucketRepository", "bitbucket-repository"),
    ("ECSTask", "ecs-task"),
    ("VertexAICustomTrainingJob", "vertex-ai-custom-training-job"),
    ("S3", "s3"),
    ("GCS", "gcs"),
    ("SMB", "smb"),
];

/// Block type slug for a block class, e.g. `KubernetesJob` → `kubernetes-job`.
///
/// Accepts a dotted path and uses its last segment.
pub fn block_type_slug(class_name: &str) -> String {
    let class_name = class_name.rsplit('.').next().unwrap_or(class_name);

    if let Some((_, slug)) = KNOWN_BLOCK_TYPES
        .iter()
        .find(|(known, _)| *known == class_name)
    {
        return (*slug).to_string();
    }

    kebab_case(class_name)
}

/// CamelCase → kebab-case, keeping acronym runs together (`HTTPServer` → `http-server`)
fn kebab_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            out.push('-');
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !out.ends_with('-') {
                out.push('-');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}
