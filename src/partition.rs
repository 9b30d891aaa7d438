use crate::error::{check_index, Result};
use crate::route::Route;
use crate::station::Station;

/// Answers whether two stations are linked by a player's network.
pub trait StationConnectivity {
    fn connected(&self, s1: &Station, s2: &Station) -> bool;
}

/// A flat partition of stations into connected sets.
///
/// Every station id in `0..station_count` maps directly to the representative of its set,
/// so connectivity queries are constant time.
/// A station outside of that range is only connected to itself.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StationPartition {
    representatives: Box<[usize]>,
}

impl StationPartition {
    /// Starts building a partition over stations whose ids are below `station_count`.
    /// Initially, every station is alone in its set.
    pub fn builder(station_count: usize) -> StationPartitionBuilder {
        StationPartitionBuilder {
            links: (0..station_count).collect(),
        }
    }

    /// The partition induced by the given routes: two stations are in the same set iff
    /// a sequence of these routes joins them.
    pub fn of_routes<'a>(routes: impl IntoIterator<Item = &'a Route> + Clone) -> Self {
        let station_count = routes
            .clone()
            .into_iter()
            .flat_map(|route| route.stations())
            .map(|station| station.id() as usize + 1)
            .max()
            .unwrap_or(0);

        let mut builder = Self::builder(station_count);
        for route in routes {
            builder.union(route.station1().id() as usize, route.station2().id() as usize);
        }
        builder.build()
    }
}

impl StationConnectivity for StationPartition {
    fn connected(&self, s1: &Station, s2: &Station) -> bool {
        let (id1, id2) = (s1.id() as usize, s2.id() as usize);
        match (self.representatives.get(id1), self.representatives.get(id2)) {
            (Some(representative1), Some(representative2)) => representative1 == representative2,
            _ => id1 == id2,
        }
    }
}

/// Deep union-find structure, flattened by `build`.
#[derive(Clone, Debug)]
pub struct StationPartitionBuilder {
    links: Vec<usize>,
}

impl StationPartitionBuilder {
    /// Joins the sets of both stations.
    ///
    /// # Example
    /// ```
    /// use rail_network::partition::{StationConnectivity, StationPartition};
    /// use rail_network::station::Station;
    ///
    /// let (lausanne, bern, zurich) = (Station::new(0, "Lausanne"), Station::new(1, "Bern"), Station::new(2, "Zürich"));
    ///
    /// let mut builder = StationPartition::builder(3);
    /// builder.connect(&lausanne, &bern).unwrap();
    /// let partition = builder.build();
    ///
    /// assert!(partition.connected(&bern, &lausanne));
    /// assert!(!partition.connected(&lausanne, &zurich));
    /// ```
    pub fn connect(&mut self, s1: &Station, s2: &Station) -> Result<&mut Self> {
        let (id1, id2) = (s1.id() as usize, s2.id() as usize);
        check_index(id1, self.links.len())?;
        check_index(id2, self.links.len())?;

        self.union(id1, id2);
        Ok(self)
    }

    pub fn build(mut self) -> StationPartition {
        for id in 0..self.links.len() {
            self.links[id] = self.representative(id);
        }
        StationPartition {
            representatives: self.links.into_boxed_slice(),
        }
    }

    // Both ids must be in range.
    fn union(&mut self, id1: usize, id2: usize) {
        let representative1 = self.representative(id1);
        let representative2 = self.representative(id2);
        self.links[representative1] = representative2;
    }

    fn representative(&self, mut id: usize) -> usize {
        while self.links[id] != id {
            id = self.links[id];
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Color;
    use crate::route::Level;

    fn stations() -> Vec<Station> {
        (0..8)
            .map(|id| Station::named(id, format!("S{}", id)))
            .collect()
    }

    #[test]
    fn fresh_partition_only_connects_equal_stations() {
        let stations = stations();
        let partition = StationPartition::builder(8).build();

        assert!(partition.connected(&stations[3], &stations[3]));
        assert!(!partition.connected(&stations[3], &stations[4]));
    }

    #[test]
    fn connections_are_transitive() -> Result<()> {
        let s = stations();
        let mut builder = StationPartition::builder(8);
        builder
            .connect(&s[0], &s[1])?
            .connect(&s[2], &s[3])?
            .connect(&s[1], &s[3])?
            .connect(&s[5], &s[6])?;
        let partition = builder.build();

        assert!(partition.connected(&s[0], &s[2]));
        assert!(partition.connected(&s[3], &s[0]));
        assert!(partition.connected(&s[6], &s[5]));
        assert!(!partition.connected(&s[0], &s[5]));
        assert!(!partition.connected(&s[4], &s[7]));

        Ok(())
    }

    #[test]
    fn stations_outside_of_the_partition() {
        let s = stations();
        let partition = StationPartition::builder(3).build();

        assert!(partition.connected(&s[5], &s[5]));
        assert!(!partition.connected(&s[5], &s[6]));
        assert!(!partition.connected(&s[0], &s[5]));
    }

    #[test]
    fn connecting_unknown_station_fails() {
        let s = stations();
        let mut builder = StationPartition::builder(3);

        assert!(builder.connect(&s[0], &s[5]).is_err());
    }

    #[test]
    fn partition_of_routes() -> Result<()> {
        let s = stations();
        let routes = vec![
            Route::new("A", s[0].clone(), s[4].clone(), 2, Level::Surface, None)?,
            Route::new("B", s[4].clone(), s[2].clone(), 3, Level::Tunnel, Some(Color::Red))?,
        ];
        let partition = StationPartition::of_routes(&routes);

        assert!(partition.connected(&s[0], &s[2]));
        assert!(!partition.connected(&s[0], &s[1]));
        // Beyond the highest id of the routes.
        assert!(!partition.connected(&s[0], &s[7]));
        assert!(partition.connected(&s[7], &s[7]));

        Ok(())
    }
}
