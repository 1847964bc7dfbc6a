//! Known NYC place names and the fuzzy resolver over them.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

const fn at(lat: f64, lng: f64) -> Coordinates {
    Coordinates { lat, lng }
}

/// Lowercase aliases to coordinates, in lookup order.
pub static KNOWN_LOCATIONS: Lazy<IndexMap<&'static str, Coordinates>> = Lazy::new(|| {
    IndexMap::from([
        ("central park", at(40.7829, -73.9654)),
        ("times square", at(40.7580, -73.9855)),
        ("brooklyn bridge", at(40.7061, -73.9969)),
        ("union square", at(40.7359, -73.9911)),
        ("washington square", at(40.7308, -73.9973)),
        ("high line", at(40.7480, -74.0048)),
        ("bryant park", at(40.7536, -73.9832)),
        ("prospect park", at(40.6602, -73.9690)),
        ("east village", at(40.7265, -73.9815)),
        ("west village", at(40.7358, -74.0027)),
        ("soho", at(40.7233, -74.0030)),
        ("chelsea", at(40.7465, -74.0014)),
        ("williamsburg", at(40.7081, -73.9571)),
        ("financial district", at(40.7074, -74.0113)),
        ("fidi", at(40.7074, -74.0113)),
        ("upper west side", at(40.7870, -73.9754)),
        ("uws", at(40.7870, -73.9754)),
        ("upper east side", at(40.7736, -73.9566)),
        ("ues", at(40.7736, -73.9566)),
        ("midtown", at(40.7549, -73.9840)),
        ("downtown", at(40.7074, -74.0113)),
        ("battery park", at(40.7033, -74.0170)),
        ("madison square park", at(40.7425, -73.9881)),
        ("flatiron", at(40.7411, -73.9897)),
        ("gramercy", at(40.7373, -73.9851)),
        ("tribeca", at(40.7163, -74.0086)),
        ("chinatown", at(40.7158, -73.9970)),
        ("little italy", at(40.7193, -73.9973)),
        ("lower east side", at(40.7177, -73.9860)),
        ("les", at(40.7177, -73.9860)),
        ("harlem", at(40.8116, -73.9465)),
        ("morningside heights", at(40.8108, -73.9622)),
        ("inwood", at(40.8677, -73.9212)),
        ("washington heights", at(40.8500, -73.9350)),
    ])
});

/// Map a free-text place name to coordinates.
///
/// The name is lowercased and trimmed, then matched exactly against the table.
/// Failing that, the first alias (in table order) that contains the name or is
/// contained in it wins. Short aliases such as `les` therefore also match
/// unrelated words ("charles street"); callers get the first hit, not the best.
pub fn resolve(name: &str) -> Option<Coordinates> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    if let Some(coords) = KNOWN_LOCATIONS.get(needle.as_str()) {
        return Some(*coords);
    }
    KNOWN_LOCATIONS
        .iter()
        .find(|(alias, _)| needle.contains(*alias) || alias.contains(needle.as_str()))
        .map(|(_, coords)| *coords)
}
