use healpix_grid::{
    BatchConfig, Destinations, HealpixCell, HealpixError, angular_distances, neighbours_disk,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), HealpixError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let lon = -2.2479699500757597;
    let lat = 53.48082746395233;

    let cell = HealpixCell::from_lonlat(&(lon, lat), 12)?;
    println!("Cell ID: {}", cell.id());
    println!("Center: ({}, {})", cell.center().x(), cell.center().y());
    println!("Polygon: {:?}", cell.to_polygon());

    let config = BatchConfig::new();
    let cells = [cell.id()];
    let disks = neighbours_disk(&cells, cell.depth(), 2, &config)?;
    let distances = angular_distances(&cells, Destinations::from(&disks), cell.depth(), &config)?;

    for (neighbour, distance) in disks.as_slice().iter().zip(distances.as_slice()) {
        println!("{neighbour:>12} {:.6} deg", distance.to_degrees());
    }

    Ok(())
}
