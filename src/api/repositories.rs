use serde_json::Value;

use crate::ClientError;
use crate::models::{CreateRepository, UpdateRepository};
use crate::path::render_path;
use crate::transport::{Payload, Request, Transport};

const REPOSITORIES: &str = "/api/v1/repositories";
const REPOSITORY: &str = "/api/v1/repositories/{name}";
const REPOSITORY_DOCTOR: &str = "/api/v1/repositories/{name}/doctor";

/// `/api/v1/repositories` endpoints. Repositories are addressed by name.
#[derive(Clone, Copy, Debug)]
pub struct Repositories<'a> {
    transport: &'a Transport,
}

impl<'a> Repositories<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Lists repositories, keeping only those whose `volumeId` equals
    /// `volume_id` when one is given.
    ///
    /// The filter runs client-side; entries without a `volumeId` field never
    /// match, and no match yields an empty list.
    pub fn list(&self, volume_id: Option<u64>) -> Result<Vec<Value>, ClientError> {
        let repositories: Vec<Value> = self
            .transport
            .execute(Request::get(REPOSITORIES))?
            .decode()?;
        Ok(match volume_id {
            Some(volume_id) => filter_by_volume(repositories, volume_id),
            None => repositories,
        })
    }

    pub fn create(&self, repository: &CreateRepository) -> Result<Value, ClientError> {
        self.call(Request::post(REPOSITORIES).json(repository)?)
    }

    pub fn get(&self, name: &str) -> Result<Value, ClientError> {
        self.call(Request::get(render_path(REPOSITORY, &[("name", name)])?))
    }

    pub fn update(&self, name: &str, changes: &UpdateRepository) -> Result<Value, ClientError> {
        self.call(Request::put(render_path(REPOSITORY, &[("name", name)])?).json(changes)?)
    }

    pub fn delete(&self, name: &str) -> Result<Payload, ClientError> {
        self.transport.execute(Request::delete(render_path(REPOSITORY, &[("name", name)])?))
    }

    /// Runs restic's check-and-repair routine on the repository.
    pub fn doctor(&self, name: &str) -> Result<Payload, ClientError> {
        self.transport.execute(Request::post(render_path(REPOSITORY_DOCTOR, &[("name", name)])?))
    }

    fn call(&self, request: Request) -> Result<Value, ClientError> {
        self.transport.execute(request)?.decode()
    }
}

fn filter_by_volume(repositories: Vec<Value>, volume_id: u64) -> Vec<Value> {
    let wanted = Value::from(volume_id);
    repositories
        .into_iter()
        .filter(|repository| repository.get("volumeId") == Some(&wanted))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::filter_by_volume;

    #[test]
    fn filter_keeps_matching_volume_ids_only() {
        let repositories = vec![
            json!({"name": "a", "volumeId": 1}),
            json!({"name": "b", "volumeId": 2}),
            json!({"name": "c"}),
            json!({"name": "d", "volumeId": 1}),
        ];
        let names: Vec<_> = filter_by_volume(repositories, 1)
            .into_iter()
            .map(|repository| repository["name"].clone())
            .collect();
        assert_eq!(names, vec![json!("a"), json!("d")]);
    }

    #[test]
    fn filter_without_matches_is_empty() {
        let repositories = vec![json!({"name": "a", "volumeId": 1})];
        assert!(filter_by_volume(repositories, 9).is_empty());
    }
}
