use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use jsonschema::JSONSchema;
use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::info;

use crate::core::error::AppError;
use crate::features::output::schemas::{
    candidates_schema, constituencies_schema, election_schema, parties_schema,
};
use crate::features::scrape::ElectionDatasets;

pub const PARTIES_FILE: &str = "parties.json";
pub const CONSTITUENCIES_FILE: &str = "constituencies.json";
pub const CANDIDATES_FILE: &str = "candidates.json";
pub const ELECTION_FILE: &str = "election.json";

struct Artifact {
    file_name: &'static str,
    bytes: Vec<u8>,
}

/// Validates the four artifacts and commits them to one directory. Nothing
/// is renamed into place until every artifact has been validated and
/// staged next to its destination.
pub struct ArtifactWriter {
    parties: JSONSchema,
    constituencies: JSONSchema,
    candidates: JSONSchema,
    election: JSONSchema,
}

impl ArtifactWriter {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            parties: compile(PARTIES_FILE, &parties_schema())?,
            constituencies: compile(CONSTITUENCIES_FILE, &constituencies_schema())?,
            candidates: compile(CANDIDATES_FILE, &candidates_schema())?,
            election: compile(ELECTION_FILE, &election_schema())?,
        })
    }

    pub async fn commit(
        &self,
        dir: &Path,
        datasets: &ElectionDatasets,
    ) -> Result<Vec<PathBuf>, AppError> {
        let artifacts = self.render(datasets)?;
        let dir = dir.to_path_buf();
        tokio::task::spawn_blocking(move || write_artifacts(&dir, artifacts))
            .await
            .map_err(|err| AppError::internal(format!("artifact writer task failed: {err}")))?
    }

    fn render(&self, datasets: &ElectionDatasets) -> Result<Vec<Artifact>, AppError> {
        let metadata = &datasets.metadata;
        if metadata.total_parties != datasets.parties.len()
            || metadata.total_constituencies != datasets.constituencies.len()
            || metadata.total_candidates != datasets.candidates.len()
        {
            return Err(AppError::serialization(
                "metadata totals do not match the collections".to_string(),
            ));
        }

        // election.json is committed last.
        Ok(vec![
            render_one(PARTIES_FILE, &self.parties, &datasets.parties)?,
            render_one(CONSTITUENCIES_FILE, &self.constituencies, &datasets.constituencies)?,
            render_one(CANDIDATES_FILE, &self.candidates, &datasets.candidates)?,
            render_one(ELECTION_FILE, &self.election, &datasets.metadata)?,
        ])
    }
}

fn compile(name: &str, schema: &Value) -> Result<JSONSchema, AppError> {
    JSONSchema::compile(schema)
        .map_err(|err| AppError::internal(format!("invalid schema for {name}: {err}")))
}

fn render_one<T: Serialize>(
    file_name: &'static str,
    schema: &JSONSchema,
    data: &T,
) -> Result<Artifact, AppError> {
    let value = serde_json::to_value(data)
        .map_err(|err| AppError::serialization(format!("failed to serialize {file_name}: {err}")))?;

    if let Err(errors) = schema.validate(&value) {
        let messages = errors
            .map(|error| format!("{} at {}", error, error.instance_path))
            .collect::<Vec<_>>();
        return Err(AppError::serialization(format!(
            "{file_name} failed validation: {}",
            messages.join("; ")
        )));
    }

    let mut bytes = serde_json::to_vec_pretty(&value)
        .map_err(|err| AppError::serialization(format!("failed to encode {file_name}: {err}")))?;
    bytes.push(b'\n');
    Ok(Artifact { file_name, bytes })
}

fn write_artifacts(dir: &Path, artifacts: Vec<Artifact>) -> Result<Vec<PathBuf>, AppError> {
    fs::create_dir_all(dir).map_err(|err| {
        AppError::write(format!("failed to create {}: {err}", dir.display()))
    })?;

    let mut staged = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let mut file = NamedTempFile::new_in(dir).map_err(|err| {
            AppError::write(format!("failed to stage {}: {err}", artifact.file_name))
        })?;
        file.write_all(&artifact.bytes)
            .and_then(|_| file.as_file().sync_all())
            .map_err(|err| {
                AppError::write(format!("failed to write {}: {err}", artifact.file_name))
            })?;
        staged.push((artifact.file_name, file));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (file_name, file) in staged {
        let destination = dir.join(file_name);
        file.persist(&destination).map_err(|err| {
            AppError::write(format!("failed to commit {}: {}", destination.display(), err.error))
        })?;
        written.push(destination);
    }

    info!(dir = %dir.display(), files = written.len(), "artifacts written");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::election::{
        Candidate, CandidateStatus, Constituency, ElectionMetadata, ElectionType, Party,
    };

    fn datasets() -> ElectionDatasets {
        ElectionDatasets {
            parties: vec![Party {
                name: "Alpha".to_string(),
                symbol: Some("A".to_string()),
                total_seats: 1,
            }],
            constituencies: vec![Constituency {
                code: "S0101".to_string(),
                name: "North".to_string(),
                state_code: Some("DL".to_string()),
            }],
            candidates: vec![Candidate {
                name: "Asha Rao".to_string(),
                party: "Alpha".to_string(),
                constituency_code: "S0101".to_string(),
                state_code: Some("DL".to_string()),
                votes: Some(1_000),
                margin: Some(10),
                status: CandidateStatus::Won,
                photo_url: None,
            }],
            metadata: ElectionMetadata {
                id: "delhi-assembly-2025".to_string(),
                name: "Delhi Legislative Assembly Elections 2025".to_string(),
                election_type: ElectionType::VidhanSabha,
                year: 2025,
                state_code: Some("DL".to_string()),
                state_name: Some("Delhi".to_string()),
                total_constituencies: 1,
                total_candidates: 1,
                total_parties: 1,
                result_status: "COMPLETE".to_string(),
                incomplete: false,
                gaps: 0,
                winning_party: Some("Alpha".to_string()),
                winning_party_seats: Some(1),
                runner_up_party: None,
                runner_up_seats: None,
                source_url: "https://results.example.test/index.htm".to_string(),
                scraped_at: "2025-02-08T10:00:00Z".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn writes_all_four_files() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = temp.path().join("vidhan_sabha").join("delhi-assembly-2025");
        let writer = ArtifactWriter::new().expect("writer");

        let written = writer.commit(&dir, &datasets()).await.expect("commit");
        assert_eq!(written.len(), 4);
        assert_eq!(written[3], dir.join(ELECTION_FILE));

        let election: Value =
            serde_json::from_slice(&fs::read(dir.join(ELECTION_FILE)).expect("read")).expect("json");
        assert_eq!(election["type"], "VIDHAN_SABHA");
        assert_eq!(election["total_candidates"], 1);

        let leftovers = fs::read_dir(&dir).expect("dir").count();
        assert_eq!(leftovers, 4);
    }

    #[tokio::test]
    async fn invalid_data_leaves_previous_files_untouched() {
        let temp = tempfile::tempdir().expect("tempdir");
        let writer = ArtifactWriter::new().expect("writer");
        writer.commit(temp.path(), &datasets()).await.expect("first commit");
        let before = fs::read(temp.path().join(PARTIES_FILE)).expect("read");

        let mut broken = datasets();
        broken.parties[0].name = "Beta".to_string();
        broken.candidates[0].name = "NOTA".to_string();
        let err = writer.commit(temp.path(), &broken).await.expect_err("rejected");
        assert!(matches!(err, AppError::Serialization(_)));
        assert_eq!(fs::read(temp.path().join(PARTIES_FILE)).expect("read"), before);
    }

    #[tokio::test]
    async fn mismatched_totals_are_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let writer = ArtifactWriter::new().expect("writer");
        let mut broken = datasets();
        broken.metadata.total_candidates = 7;

        assert!(writer.commit(temp.path(), &broken).await.is_err());
        assert_eq!(fs::read_dir(temp.path()).expect("dir").count(), 0);
    }
}
