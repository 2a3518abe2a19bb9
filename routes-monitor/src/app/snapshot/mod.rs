mod route_snapshot;
mod run;

pub use route_snapshot::RouteSnapshot;
pub use run::{collect_snapshots, run, write_snapshots, SnapshotOptions};
