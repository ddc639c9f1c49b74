//! Epidemiological dataset
//!
//! - **types**: observations and the in-memory table
//! - **loader**: CSV reading and the process-wide `DatasetCache`
//! - **preprocess**: date coercion and zero-fill
//! - **error**: Data-Unavailable errors
//!
//! # Example
//!
//! ```rust,no_run
//! use epidash::dataset::DatasetCache;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cache = DatasetCache::new("./owid-covid-data.csv");
//!     let table = cache.get().await?;
//!     println!("{}", table.stats());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loader;
pub mod preprocess;
pub mod types;

pub use error::{DataError, DataResult};
pub use loader::{
    load_observations, read_observations, read_observations_str, write_observations,
    DatasetCache,
};
pub use preprocess::{parse_date, preprocess};
pub use types::{
    Observation, ObservationTable, RawObservation, TableStats, REQUIRED_COLUMNS, WORLD,
};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Chile: seven days, listed out of order, new cases peak on 03-02 and
    /// on the 03-04/03-05 plateau. Nauru: one empty row. Kosovo: no ISO
    /// alpha-2 code and one unparseable date.
    pub const SAMPLE_CSV: &str = "iso_code,continent,location,date,total_cases,new_cases,total_deaths
CHL,South America,Chile,2021-03-02,2500,1500,30
CHL,South America,Chile,2021-03-01,1000,100,20
CHL,South America,Chile,2021-03-03,3400,900,45
CHL,South America,Chile,2021-03-04,5400,2000,60
CHL,South America,Chile,2021-03-05,7400,2000,80
CHL,South America,Chile,2021-03-06,7900,500,90
CHL,South America,Chile,2021-03-07,8700,800,100
NRU,Oceania,Nauru,2021-03-07,,,
OWID_KOS,Europe,Kosovo,2021-03-06,300,10,
OWID_KOS,Europe,Kosovo,n/a,310,10,1
OWID_WRL,,World,2021-03-01,100000,5000,2000
OWID_WRL,,World,2021-03-07,150000,7000,3000
";

    pub fn sample_table() -> ObservationTable {
        read_observations_str(SAMPLE_CSV).expect("sample dataset parses")
    }
}
