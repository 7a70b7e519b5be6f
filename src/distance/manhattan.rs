//! Manhattan distance and route-length accumulation.

use crate::models::Location;

/// Manhattan distance `|Δlat| + |Δlon|` between two locations.
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::manhattan;
/// use u_dispatch::models::Location;
///
/// let d = manhattan(&Location::new(0.0, 0.0), &Location::new(-3.0, 4.0));
/// assert_eq!(d, 7.0);
/// ```
pub fn manhattan(a: &Location, b: &Location) -> f64 {
    a.manhattan_to(b)
}

/// Length of a closed trip: depot → stops in order → depot.
///
/// An empty stop list has length 0.
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::route_distance;
/// use u_dispatch::models::Location;
///
/// let depot = Location::new(0.0, 0.0);
/// let stops = [Location::new(1.0, 2.0), Location::new(4.0, 6.0), Location::new(7.0, 8.0)];
/// // 3 + 7 + 5 + 15
/// assert_eq!(route_distance(&stops, &depot), 30.0);
/// assert_eq!(route_distance(&[], &depot), 0.0);
/// ```
pub fn route_distance(stops: &[Location], depot: &Location) -> f64 {
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return 0.0,
    };
    manhattan(depot, first) + path_length(stops.iter()) + manhattan(last, depot)
}

/// Sum of Manhattan distances between consecutive locations of an open path.
///
/// Paths with fewer than two points have length 0.
pub fn path_length<'a, I>(points: I) -> f64
where
    I: IntoIterator<Item = &'a Location>,
{
    let mut iter = points.into_iter();
    let Some(mut prev) = iter.next() else {
        return 0.0;
    };
    let mut total = 0.0;
    for p in iter {
        total += manhattan(prev, p);
        prev = p;
    }
    total
}
