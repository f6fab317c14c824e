//! Reservation store backed by a REST API.
//!
//! Endpoints, relative to the configured base URL:
//!
//! | Operation   | Request                         |
//! |-------------|---------------------------------|
//! | `list`      | `GET /reservations`             |
//! | `get_by_id` | `GET /reservations/{id}`        |
//! | `create`    | `POST /reservations` (no `id`)  |
//! | `update`    | `PUT /reservations/{id}`        |
//! | `delete`    | `DELETE /reservations/{id}`     |

use std::fmt;
use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::reservation::{Reservation, ReservationDraft, ReservationId};
use crate::store::ReservationStore;

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A request to the reservation API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// JSON body, if any.
    pub body: Option<serde_json::Value>,
}

/// A response from the reservation API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl ApiResponse {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends API requests. Implemented over HTTP by [`HttpTransport`].
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    /// Sends one request and returns whatever the server answered.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response was received.
    fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// Blocking HTTP transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Creates a transport whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Put => self.client.put(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(ApiResponse { status, body })
    }
}

/// Reservation store that forwards every operation to the API.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use innkeep::store::{HttpTransport, RemoteStore};
///
/// let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
/// let store = RemoteStore::new("http://localhost:3000", transport).unwrap();
/// assert_eq!(store.collection_url(), "http://localhost:3000/reservations");
/// ```
#[derive(Debug)]
pub struct RemoteStore<T> {
    collection: Url,
    transport: T,
}

impl<T: Transport> RemoteStore<T> {
    /// Creates a store for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] unless `base_url` is an absolute
    /// `http` or `https` URL.
    pub fn new(base_url: &str, transport: T) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidUrl {
            url: base_url.to_string(),
            reason: reason.to_string(),
        };

        let mut collection = Url::parse(base_url).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(collection.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        collection
            .path_segments_mut()
            .map_err(|()| invalid("URL cannot have a path"))?
            .pop_if_empty()
            .push("reservations");

        Ok(Self {
            collection,
            transport,
        })
    }

    /// URL of the reservations collection.
    #[must_use]
    pub fn collection_url(&self) -> &str {
        self.collection.as_str()
    }

    fn item_url(&self, id: &ReservationId) -> String {
        let mut url = self.collection.clone();
        // The collection URL was checked to be hierarchical in `new`
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&id.as_path_segment());
        }
        url.into()
    }

    fn send(
        &self,
        method: Method,
        url: String,
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse> {
        log::debug!("{method} {url}");
        let response = self.transport.send(ApiRequest {
            method,
            url: url.clone(),
            body,
        })?;

        if response.is_success() {
            Ok(response)
        } else {
            log::debug!("{method} {url} answered {}", response.status);
            Err(Error::Api {
                status: response.status,
                method: method.to_string(),
                url,
            })
        }
    }

    fn decode<V: DeserializeOwned>(response: &ApiResponse) -> Result<V> {
        Ok(serde_json::from_str(&response.body)?)
    }
}

impl<T: Transport> ReservationStore for RemoteStore<T> {
    fn backend_name(&self) -> &'static str {
        "remote"
    }

    fn list(&self) -> Result<Vec<Reservation>> {
        let response = self.send(Method::Get, self.collection_url().to_string(), None)?;
        Self::decode(&response)
    }

    fn get_by_id(&self, id: &ReservationId) -> Result<Option<Reservation>> {
        match self.send(Method::Get, self.item_url(id), None) {
            Ok(response) => Self::decode(&response).map(Some),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn create(&mut self, draft: ReservationDraft) -> Result<Reservation> {
        let body = serde_json::to_value(&draft)?;
        let response = self.send(Method::Post, self.collection_url().to_string(), Some(body))?;
        let created: Reservation = Self::decode(&response)?;
        log::info!("Created reservation {}", created.id);
        Ok(created)
    }

    fn update(&mut self, reservation: &Reservation) -> Result<Option<Reservation>> {
        let body = serde_json::to_value(reservation)?;
        let response = match self.send(Method::Put, self.item_url(&reservation.id), Some(body)) {
            Ok(response) => response,
            Err(e) if e.is_not_found() => {
                return Err(Error::NotFound {
                    resource: format!("reservation {}", reservation.id),
                })
            }
            Err(e) => return Err(e),
        };

        log::info!("Updated reservation {}", reservation.id);
        if response.body.trim().is_empty() {
            return Ok(Some(reservation.clone()));
        }
        Self::decode(&response).map(Some)
    }

    fn delete(&mut self, id: &ReservationId) -> Result<()> {
        match self.send(Method::Delete, self.item_url(id), None) {
            Ok(_) => {
                log::info!("Deleted reservation {id}");
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                log::debug!("No reservation {id} to delete");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
