//! Hand-written schema validation over parsed JSON values.
//!
//! Every validator walks the whole value and collects one message per
//! violated field rather than stopping at the first problem, so a caller
//! can report the complete list back to whoever produced the document.

use chrono::DateTime;
use serde_json::{Map, Value};
use std::collections::HashSet;
use url::Url;

use super::{
    DockerInstructions, GITHUB_URL_PREFIX, Instructions, MobileInstructions, OsInstructions,
    Repository,
};

const MAX_NAME_LEN: usize = 100;
const MAX_SUMMARY_LEN: usize = 500;

/// Validates a whole catalog document of the shape `{"repositories": [...]}`.
/// An optional `metadata` member is tolerated and ignored.
///
/// Returns the typed list, or every field violation found across the
/// document. Identifiers must be unique across the store.
pub fn repositories(value: &Value) -> Result<Vec<Repository>, Vec<String>> {
    let Some(object) = value.as_object() else {
        return Err(vec![
            "document: must be a JSON object with a 'repositories' array".to_string(),
        ]);
    };
    let Some(list) = object.get("repositories").and_then(Value::as_array) else {
        return Err(vec!["repositories: must be an array".to_string()]);
    };

    let mut errors = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut repos = Vec::with_capacity(list.len());

    for (idx, entry) in list.iter().enumerate() {
        let label = format!("repositories[{idx}]");
        if let Some(repo) = repository(entry, &label, &mut errors) {
            if !seen.insert(repo.id.clone()) {
                errors.push(format!("{label}.id: duplicate identifier '{}'", repo.id));
            }
            repos.push(repo);
        }
    }

    if errors.is_empty() { Ok(repos) } else { Err(errors) }
}

/// Validates a single repository record, appending any violations to
/// `errors`. Returns the typed record only when the entry is fully valid.
fn repository(value: &Value, label: &str, errors: &mut Vec<String>) -> Option<Repository> {
    let Some(object) = value.as_object() else {
        errors.push(format!("{label}: must be an object"));
        return None;
    };
    let before = errors.len();

    let id = required_string(object, "id", label, errors);
    if let Some(id) = &id
        && !is_catalog_id(id)
    {
        errors.push(format!(
            "{label}.id: must be a lowercase slug matching 'owner-name'"
        ));
    }

    let url = required_string(object, "url", label, errors);
    if let Some(url) = &url
        && !is_github_url(url)
    {
        errors.push(format!(
            "{label}.url: must be a well-formed URL starting with {GITHUB_URL_PREFIX}"
        ));
    }

    let name = required_string(object, "name", label, errors);
    if let Some(name) = &name {
        check_bounded(name, "name", MAX_NAME_LEN, true, label, errors);
    }
    let owner = required_string(object, "owner", label, errors);
    if let Some(owner) = &owner {
        check_bounded(owner, "owner", MAX_NAME_LEN, true, label, errors);
    }
    let summary = required_string(object, "summary", label, errors);
    if let Some(summary) = &summary {
        check_bounded(summary, "summary", MAX_SUMMARY_LEN, false, label, errors);
    }

    let created_at = required_datetime(object, "createdAt", label, errors);
    let last_updated_at = required_datetime(object, "lastUpdatedAt", label, errors);
    let added_at = required_datetime(object, "addedAt", label, errors);

    if errors.len() > before {
        return None;
    }
    Some(Repository {
        id: id?,
        url: url?,
        name: name?,
        owner: owner?,
        summary: summary?,
        created_at: created_at?,
        last_updated_at: last_updated_at?,
        added_at: added_at?,
    })
}

/// Validates one entry of the instructions map.
pub fn instructions(value: &Value) -> Result<Instructions, Vec<String>> {
    let Some(object) = value.as_object() else {
        return Err(vec!["instructions: must be an object".to_string()]);
    };
    let mut errors = Vec::new();

    let mac_os = object
        .get("macOS")
        .and_then(|v| os_entry(v, "macOS", &mut errors));
    let windows = object
        .get("windows")
        .and_then(|v| os_entry(v, "windows", &mut errors));
    let linux = object
        .get("linux")
        .and_then(|v| os_entry(v, "linux", &mut errors));
    let docker = object
        .get("docker")
        .and_then(|v| docker_entry(v, &mut errors));
    let mobile = object
        .get("mobile")
        .and_then(|v| mobile_entry(v, &mut errors));

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(Instructions {
        mac_os,
        windows,
        linux,
        docker,
        mobile,
    })
}

fn os_entry(value: &Value, label: &str, errors: &mut Vec<String>) -> Option<OsInstructions> {
    let object = instruction_object(value, label, errors)?;
    let before = errors.len();
    let (summary, steps, notes) = os_fields(object, label, errors);
    if errors.len() > before {
        return None;
    }
    Some(OsInstructions {
        summary: summary?,
        steps: steps?,
        notes,
    })
}

fn docker_entry(value: &Value, errors: &mut Vec<String>) -> Option<DockerInstructions> {
    let label = "docker";
    let object = instruction_object(value, label, errors)?;
    let before = errors.len();
    let (summary, steps, notes) = os_fields(object, label, errors);
    let is_preferred = required_bool(object, "isPreferred", label, errors);
    let rationale = required_string(object, "rationale", label, errors);
    if errors.len() > before {
        return None;
    }
    Some(DockerInstructions {
        summary: summary?,
        steps: steps?,
        notes,
        is_preferred: is_preferred?,
        rationale: rationale?,
    })
}

fn mobile_entry(value: &Value, errors: &mut Vec<String>) -> Option<MobileInstructions> {
    let label = "mobile";
    let object = instruction_object(value, label, errors)?;
    let before = errors.len();
    let (summary, steps, notes) = os_fields(object, label, errors);
    let host_os = required_string(object, "hostOS", label, errors);
    let device_os = required_string(object, "deviceOS", label, errors);
    if errors.len() > before {
        return None;
    }
    Some(MobileInstructions {
        summary: summary?,
        steps: steps?,
        notes,
        host_os: host_os?,
        device_os: device_os?,
    })
}

fn instruction_object<'a>(
    value: &'a Value,
    label: &str,
    errors: &mut Vec<String>,
) -> Option<&'a Map<String, Value>> {
    match value.as_object() {
        Some(object) => Some(object),
        None => {
            errors.push(format!("{label}: must be an object"));
            None
        }
    }
}

/// Shared summary/steps/notes triple present on every instruction shape.
fn os_fields(
    object: &Map<String, Value>,
    label: &str,
    errors: &mut Vec<String>,
) -> (Option<String>, Option<Vec<String>>, Option<String>) {
    let summary = required_string(object, "summary", label, errors);
    if let Some(summary) = &summary
        && summary.is_empty()
    {
        errors.push(format!("{label}.summary: must not be empty"));
    }

    let steps = match object.get("steps") {
        Some(Value::Array(items)) => {
            let mut collected = Vec::with_capacity(items.len());
            let mut ok = true;
            for (idx, item) in items.iter().enumerate() {
                match item.as_str() {
                    Some(step) => collected.push(step.to_string()),
                    None => {
                        errors.push(format!("{label}.steps[{idx}]: must be a string"));
                        ok = false;
                    }
                }
            }
            ok.then_some(collected)
        }
        Some(_) => {
            errors.push(format!("{label}.steps: must be an array of strings"));
            None
        }
        None => {
            errors.push(format!("{label}.steps: is required"));
            None
        }
    };

    let notes = match object.get("notes") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(format!("{label}.notes: must be a string"));
            None
        }
        None => None,
    };

    (summary, steps, notes)
}

fn required_string(
    object: &Map<String, Value>,
    key: &str,
    label: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    match object.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(format!("{label}.{key}: must be a string"));
            None
        }
        None => {
            errors.push(format!("{label}.{key}: is required"));
            None
        }
    }
}

fn required_bool(
    object: &Map<String, Value>,
    key: &str,
    label: &str,
    errors: &mut Vec<String>,
) -> Option<bool> {
    match object.get(key) {
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => {
            errors.push(format!("{label}.{key}: must be a boolean"));
            None
        }
        None => {
            errors.push(format!("{label}.{key}: is required"));
            None
        }
    }
}

fn required_datetime(
    object: &Map<String, Value>,
    key: &str,
    label: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    let value = required_string(object, key, label, errors)?;
    if DateTime::parse_from_rfc3339(&value).is_err() {
        errors.push(format!("{label}.{key}: must be an ISO-8601 datetime"));
        return None;
    }
    Some(value)
}

fn check_bounded(
    value: &str,
    key: &str,
    max: usize,
    require_non_empty: bool,
    label: &str,
    errors: &mut Vec<String>,
) {
    if require_non_empty && value.is_empty() {
        errors.push(format!("{label}.{key}: must not be empty"));
    }
    if value.chars().count() > max {
        errors.push(format!("{label}.{key}: must be at most {max} characters"));
    }
}

/// Checks the `owner-name` identifier slug: one or more `[a-z0-9]`, a dash,
/// then one or more `[a-z0-9_-]`.
pub fn is_catalog_id(s: &str) -> bool {
    let Some((owner, rest)) = s.split_once('-') else {
        return false;
    };
    !owner.is_empty()
        && owner
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        && !rest.is_empty()
        && rest
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

fn is_github_url(s: &str) -> bool {
    s.starts_with(GITHUB_URL_PREFIX) && Url::parse(s).is_ok()
}
