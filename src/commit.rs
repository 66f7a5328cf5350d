use serde::{Deserialize, Serialize};

/// Author or committer of a commit
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Person {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModifiedFile {
    pub filename: String,
}

/// `GET /commits/show/{owner}/{name}/{sha}`
#[derive(Debug, Clone, Deserialize)]
pub struct RawCommitInfo {
    pub id: String,
    pub message: String,
    pub author: Person,
    pub committer: Person,
    pub authored_date: String,
    /// Path of the commit page, relative to the hosting site
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub added: Vec<String>,
    #[serde(default)]
    pub removed: Vec<String>,
    #[serde(default)]
    pub modified: Vec<ModifiedFile>,
}

impl RawCommitInfo {
    pub fn modified_files(&self) -> Vec<String> {
        self.modified.iter().map(|f| f.filename.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn file_lists_default_to_empty() {
        let commit: RawCommitInfo = serde_json::from_value(json!({
            "id": "deadbeef",
            "message": "fix",
            "authored_date": "2021-01-01T00:00:00Z",
            "author": { "name": "A", "email": "a@x.com" },
            "committer": { "name": "A", "email": "a@x.com", "login": "acme" },
        }))
        .unwrap();

        assert!(commit.added.is_empty());
        assert!(commit.modified_files().is_empty());
        assert_eq!(commit.url, None);
    }

    #[test]
    fn modified_entries_are_reduced_to_file_names() {
        let commit: RawCommitInfo = serde_json::from_value(json!({
            "id": "deadbeef",
            "message": "fix",
            "authored_date": "2021-01-01T00:00:00Z",
            "author": { "name": "A", "email": "a@x.com" },
            "committer": { "name": "A", "email": "a@x.com" },
            "modified": [{ "filename": "src/lib.rs", "diff": "@@ -1 +1 @@" }],
        }))
        .unwrap();

        assert_eq!(commit.modified_files(), vec!["src/lib.rs"]);
    }
}
