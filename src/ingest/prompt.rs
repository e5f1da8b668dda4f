use super::GitHubUrl;

/// Builds the analysis prompt for one repository. The model is instructed
/// to answer with a single JSON object in the Repository+Instructions shape
/// so the response can be parsed directly after fence stripping.
pub fn build_prompt(url: &str, repo: &GitHubUrl) -> String {
    let id = repo.catalog_id();
    format!(
        r#"You are an expert software engineering analyst. Your task is to analyze a GitHub repository and extract key metadata and installation instructions. You MUST return your response as a single, valid JSON object and nothing else.

The repository URL is: {url}

Required JSON output format:
{{
  "id": "{id}",
  "url": "{url}",
  "name": "{name}",
  "owner": "{owner}",
  "summary": "A concise, one-paragraph summary of what this repository is for and its key features.",
  "createdAt": "ISO 8601 format",
  "lastUpdatedAt": "ISO 8601 format",
  "instructions": {{
    "macOS": {{ "summary": "...", "steps": ["...", "..."], "notes": "..." }},
    "windows": {{ "summary": "...", "steps": ["...", "..."], "notes": "..." }},
    "linux": {{ "summary": "...", "steps": ["...", "..."], "notes": "..." }},
    "docker": {{
      "summary": "...",
      "steps": ["...", "..."],
      "notes": "...",
      "isPreferred": boolean,
      "rationale": "..."
    }}
  }}
}}

Instructions:
1. Use exact 'id', 'url', 'name', 'owner' values provided above.
2. Fetch the repository page and create comprehensive yet brief summary from the README.
3. For timestamps, use current time in ISO 8601 format (YYYY-MM-DDTHH:MM:SSZ).
4. For each OS: provide installation summary, exact shell commands in 'steps', prerequisites in 'notes'.
5. If no instructions found for specific OS, return empty object {{}}.
6. Set 'docker.isPreferred' to true only if documentation explicitly recommends Docker.
7. Provide clear rationale for Docker preference decision.
8. Return ONLY the JSON object, no markdown formatting or additional text."#,
        name = repo.name,
        owner = repo.owner,
    )
}
