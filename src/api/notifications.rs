use serde_json::Value;

use crate::ClientError;
use crate::models::{CreateDestination, UpdateDestination};
use crate::path::render_path;
use crate::transport::{Payload, Request, Transport};

const DESTINATIONS: &str = "/api/v1/notification-destinations";
const DESTINATION: &str = "/api/v1/notification-destinations/{destination_id}";
const DESTINATION_TEST: &str = "/api/v1/notification-destinations/{destination_id}/test";

/// `/api/v1/notification-destinations` endpoints.
#[derive(Clone, Copy, Debug)]
pub struct Notifications<'a> {
    transport: &'a Transport,
}

impl<'a> Notifications<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub fn list_destinations(&self) -> Result<Value, ClientError> {
        self.call(Request::get(DESTINATIONS))
    }

    pub fn create_destination(
        &self,
        destination: &CreateDestination,
    ) -> Result<Value, ClientError> {
        self.call(Request::post(DESTINATIONS).json(destination)?)
    }

    pub fn get_destination(&self, destination_id: u64) -> Result<Value, ClientError> {
        self.call(Request::get(destination_path(DESTINATION, destination_id)?))
    }

    pub fn update_destination(
        &self,
        destination_id: u64,
        changes: &UpdateDestination,
    ) -> Result<Value, ClientError> {
        self.call(Request::put(destination_path(DESTINATION, destination_id)?).json(changes)?)
    }

    pub fn delete_destination(&self, destination_id: u64) -> Result<Payload, ClientError> {
        self.transport.execute(Request::delete(destination_path(DESTINATION, destination_id)?))
    }

    /// Sends a test notification through the destination.
    pub fn test_destination(&self, destination_id: u64) -> Result<Payload, ClientError> {
        self.transport.execute(Request::post(destination_path(DESTINATION_TEST, destination_id)?))
    }

    fn call(&self, request: Request) -> Result<Value, ClientError> {
        self.transport.execute(request)?.decode()
    }
}

fn destination_path(template: &'static str, destination_id: u64) -> Result<String, ClientError> {
    let destination_id = destination_id.to_string();
    render_path(template, &[("destination_id", destination_id.as_str())])
}
