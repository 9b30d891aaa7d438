use crate::route::Route;
use crate::station::Station;

use lazy_static::lazy_static;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{mpsc, Mutex};
use threadpool::ThreadPool;

lazy_static! {
    static ref THREAD_POOL: Mutex<ThreadPool> = Mutex::new(ThreadPool::default());
}

/// A sequence of routes, each one starting where the previous one ends.
///
/// A trail never uses the same route twice, but may go through the same station many times.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Trail {
    routes: Vec<Route>,
    length: u32,
    station1: Option<Station>,
    station2: Option<Station>,
}

impl Trail {
    /// The trail of length zero, without any station.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    // `from` must be an end of `route`.
    fn starting_at(route: &Route, from: &Station) -> Self {
        let to = if from.id() == route.station1().id() {
            route.station2()
        } else {
            route.station1()
        };
        Self {
            routes: vec![route.clone()],
            length: route.length() as u32,
            station1: Some(from.clone()),
            station2: Some(to.clone()),
        }
    }

    /// This trail followed by `route`, if `route` leaves from the end of the trail.
    fn extended(&self, route: &Route) -> Option<Self> {
        let end = self.station2.as_ref()?;
        let next = route.station_opposite(end).ok()?;

        let mut routes = self.routes.clone();
        routes.push(route.clone());
        Some(Self {
            routes,
            length: self.length + route.length() as u32,
            station1: self.station1.clone(),
            station2: Some(next.clone()),
        })
    }

    fn extensions<'a>(&'a self, routes: &'a [Route]) -> impl Iterator<Item = Trail> + 'a {
        routes
            .iter()
            .filter(move |route| !self.routes.contains(route))
            .filter_map(move |route| self.extended(route))
    }

    fn ends_at(&self, station: &Station) -> bool {
        self.station2
            .as_ref()
            .map_or(false, |end| end.id() == station.id())
    }

    /// The trail of minimal total length going from `start` to `end`, using only the given
    /// routes. Empty if `start` and `end` are the same station, or if they are not connected.
    ///
    /// Trails are grown one route at a time. A trail reaching `end` is a candidate and is
    /// not extended further, and partial trails already as long as the best candidate are
    /// dropped. Between candidates of equal length, the first one found wins.
    ///
    /// # Example
    /// ```
    /// use rail_network::route::{Level, Route};
    /// use rail_network::station::Station;
    /// use rail_network::trail::Trail;
    ///
    /// let (a, b, c) = (Station::new(0, "A"), Station::new(1, "B"), Station::new(2, "C"));
    /// let routes = vec![
    ///     Route::new("AB", a.clone(), b.clone(), 2, Level::Surface, None).unwrap(),
    ///     Route::new("BC", b.clone(), c.clone(), 2, Level::Surface, None).unwrap(),
    ///     Route::new("AC", a.clone(), c.clone(), 5, Level::Surface, None).unwrap(),
    /// ];
    ///
    /// let trail = Trail::shortest(&routes, &a, &c);
    /// assert_eq!(trail.length(), 4);
    /// assert_eq!(trail.to_string(), "A - B - C (4)");
    /// ```
    pub fn shortest(routes: &[Route], start: &Station, end: &Station) -> Self {
        if start.id() == end.id() {
            return Self::empty();
        }

        let mut frontier: Vec<Trail> = routes
            .iter()
            .filter(|route| route.station_opposite(start).is_ok())
            .map(|route| Self::starting_at(route, start))
            .collect();
        let mut shortest: Option<Trail> = None;

        while !frontier.is_empty() {
            let mut next_frontier = Vec::new();
            for trail in frontier {
                if let Some(best) = &shortest {
                    if trail.length >= best.length {
                        continue;
                    }
                }
                if trail.ends_at(end) {
                    shortest = Some(trail);
                    continue;
                }
                next_frontier.extend(trail.extensions(routes));
            }
            frontier = next_frontier;
        }

        shortest.unwrap_or_default()
    }

    /// The trail of maximal total length among all trails made of the given routes.
    ///
    /// Each route seeds two trails, one per direction, then trails are extended until none
    /// can be. Between trails of equal length, the first one found wins.
    ///
    /// # Example
    /// ```
    /// use rail_network::route::{Level, Route};
    /// use rail_network::station::Station;
    /// use rail_network::trail::Trail;
    ///
    /// let (a, b, c, d) = (Station::new(0, "A"), Station::new(1, "B"), Station::new(2, "C"), Station::new(3, "D"));
    /// let routes = vec![
    ///     Route::new("AB", a, b.clone(), 3, Level::Surface, None).unwrap(),
    ///     Route::new("BC", b.clone(), c, 1, Level::Surface, None).unwrap(),
    ///     Route::new("BD", b, d, 4, Level::Surface, None).unwrap(),
    /// ];
    ///
    /// assert_eq!(Trail::longest(&routes).length(), 7);
    /// assert_eq!(Trail::longest(&[]).length(), 0);
    /// ```
    pub fn longest(routes: &[Route]) -> Self {
        let mut frontier: Vec<Trail> = routes
            .iter()
            .flat_map(|route| {
                [
                    Self::starting_at(route, route.station1()),
                    Self::starting_at(route, route.station2()),
                ]
            })
            .collect();
        let mut longest = Self::empty();

        while !frontier.is_empty() {
            let mut next_frontier = Vec::new();
            for trail in frontier {
                next_frontier.extend(trail.extensions(routes));
                if trail.length > longest.length {
                    longest = trail;
                }
            }
            frontier = next_frontier;
        }

        longest
    }

    /// Computes `Trail::longest` for each set of routes, each set on its own worker of a
    /// shared thread pool. Trails are returned in the order of the sets.
    pub fn longest_of_each(route_sets: Vec<Vec<Route>>) -> Vec<Trail> {
        let (tx, rx) = mpsc::channel();
        {
            let thread_pool = match THREAD_POOL.lock() {
                Ok(thread_pool) => thread_pool,
                Err(poisoned) => poisoned.into_inner(),
            };
            for (index, routes) in route_sets.iter().enumerate() {
                let routes = routes.clone();
                let tx = tx.clone();
                thread_pool.execute(move || {
                    // The receiver only hangs up once every result came in.
                    let _ = tx.send((index, Trail::longest(&routes)));
                });
            }
        }
        drop(tx);

        Self::completed(&route_sets, rx)
    }

    // Trails of a worker that died before sending are computed on the calling thread.
    fn completed(
        route_sets: &[Vec<Route>],
        results: impl IntoIterator<Item = (usize, Trail)>,
    ) -> Vec<Trail> {
        let mut trails: Vec<Option<Trail>> = vec![None; route_sets.len()];
        for (index, trail) in results {
            trails[index] = Some(trail);
        }

        trails
            .into_iter()
            .zip(route_sets)
            .enumerate()
            .map(|(index, (trail, routes))| {
                trail.unwrap_or_else(|| {
                    warn!("No longest trail came back for set {}, computing it again.", index);
                    Self::longest(routes)
                })
            })
            .collect()
    }

    #[inline]
    pub fn length(&self) -> u32 {
        self.length
    }

    #[inline]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// First station of the trail, `None` for the empty trail.
    #[inline]
    pub fn station1(&self) -> Option<&Station> {
        self.station1.as_ref()
    }

    /// Last station of the trail, `None` for the empty trail.
    #[inline]
    pub fn station2(&self) -> Option<&Station> {
        self.station2.as_ref()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Display for Trail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current = match &self.station1 {
            Some(station) => station,
            None => return write!(f, "(empty trail) (0)"),
        };

        write!(f, "{}", current)?;
        for route in &self.routes {
            current = route.station_opposite(current).map_err(|_| fmt::Error)?;
            write!(f, " - {}", current)?;
        }
        write!(f, " ({})", self.length)
    }
}
