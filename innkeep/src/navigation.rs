//! Routes between the list and form views.
//!
//! A [`Router`] remembers the current [`Route`] and pushes every navigation
//! to its subscribers over `std::sync::mpsc` channels. A subscriber reads
//! events at its own pace through a [`RouteSubscription`]; dropping the
//! subscription unsubscribes.
//!
//! # Examples
//!
//! ```
//! use innkeep::navigation::{Route, Router};
//! use innkeep::ReservationId;
//!
//! let mut router = Router::new(Route::List);
//! let events = router.subscribe();
//!
//! router.navigate("/reservations/42/edit".parse().unwrap());
//! router.navigate(Route::List);
//!
//! let seen: Vec<Route> = events.pending().collect();
//! assert_eq!(seen, vec![Route::Edit(ReservationId::Number(42)), Route::List]);
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::error::{Error, Result};
use crate::reservation::ReservationId;

const ROOT: &str = "reservations";

/// A place in the app.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/reservations`
    List,
    /// `/reservations/new`
    New,
    /// `/reservations/{id}/edit`
    Edit(ReservationId),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "/{ROOT}"),
            Self::New => write!(f, "/{ROOT}/new"),
            Self::Edit(id) => write!(f, "/{ROOT}/{id}/edit"),
        }
    }
}

impl FromStr for Route {
    type Err = Error;

    /// Parses a path. The empty path and `/` mean the list.
    fn from_str(path: &str) -> Result<Self> {
        let segments: Vec<&str> = path
            .trim()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] | [ROOT] => Ok(Self::List),
            [ROOT, "new"] => Ok(Self::New),
            [ROOT, id, "edit"] => Ok(Self::Edit(
                id.parse().unwrap_or_else(|never| match never {}),
            )),
            _ => Err(Error::NotFound {
                resource: format!("route '{path}'"),
            }),
        }
    }
}

/// Receiving end of a router subscription.
#[derive(Debug)]
pub struct RouteSubscription {
    events: Receiver<Route>,
}

impl RouteSubscription {
    /// The next queued event, if any.
    #[must_use]
    pub fn next_event(&self) -> Option<Route> {
        self.events.try_recv().ok()
    }

    /// Every queued event, oldest first. Events sent while iterating are
    /// included.
    pub fn pending(&self) -> impl Iterator<Item = Route> + '_ {
        self.events.try_iter()
    }
}

/// Current route plus the subscribers to notify when it changes.
#[derive(Debug)]
pub struct Router {
    current: Route,
    subscribers: Vec<Sender<Route>>,
}

impl Router {
    /// A router starting at `initial`.
    #[must_use]
    pub const fn new(initial: Route) -> Self {
        Self {
            current: initial,
            subscribers: Vec::new(),
        }
    }

    /// The route last navigated to.
    #[must_use]
    pub const fn current(&self) -> &Route {
        &self.current
    }

    /// Goes to `route` and queues it for every live subscriber.
    ///
    /// Subscribers whose [`RouteSubscription`] was dropped are removed here.
    pub fn navigate(&mut self, route: Route) {
        log::debug!("Navigating from {} to {route}", self.current);
        self.subscribers
            .retain(|subscriber| subscriber.send(route.clone()).is_ok());
        self.current = route;
    }

    /// Starts receiving future navigations.
    pub fn subscribe(&mut self) -> RouteSubscription {
        let (sender, events) = mpsc::channel();
        self.subscribers.push(sender);
        RouteSubscription { events }
    }

    /// Number of subscribers still registered. Dropped subscriptions are
    /// counted until the next navigation.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::List)
    }
}
