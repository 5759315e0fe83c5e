//! End-to-end checks: CSV on disk -> load -> filter -> aggregate -> geo.

use sales_dashboard::data::{
    filter, DataLoader, Dataset, FilterSelection, LoadError, LoadOptions, ProductSet,
    SourceEncoding, YearRange,
};
use sales_dashboard::geo::Gazetteer;
use sales_dashboard::stats::{DashboardSnapshot, MetricAggregator, TOP_CITY_COUNT};
use std::io::Write;
use tempfile::NamedTempFile;

const HEADER: &str = "ORDERNUMBER,QUANTITYORDERED,PRICEEACH,ORDERLINENUMBER,SALES,ORDERDATE,STATUS,PRODUCTLINE,CUSTOMERNAME,ADDRESSLINE1,CITY,COUNTRY";

const ROWS: [&str; 10] = [
    "10107,30,95.70,2,2871,2/24/2003 0:00,Shipped,Motorcycles,Land of Toys Inc.,897 Long Airport Avenue,NYC,USA",
    "10121,34,81.35,5,2765.9,5/7/2003 0:00,Shipped,Motorcycles,Reims Collectables,59 rue de l'Abbaye,Reims,France",
    "10134,41,94.74,2,3884.34,7/1/2003 0:00,Shipped,Classic Cars,Lyon Souveniers,27 rue du Colonel Pierre Avia,Paris,France",
    "10145,45,83.26,6,3746.7,8/25/2003 0:00,Shipped,Classic Cars,Toys4GrownUps.com,78934 Hillside Dr.,Pasadena,USA",
    "10159,49,100,14,5205.27,10/10/2003 0:00,Shipped,Trucks and Buses,Corporate Gift Ideas Co.,7734 Strong St.,San Francisco,USA",
    "10168,36,96.66,1,3479.76,10/28/2003 0:00,Shipped,Vintage Cars,Technics Stores Inc.,9408 Furth Circle,Burlingame,USA",
    "10180,29,86.13,9,2497.77,11/11/2004 0:00,Shipped,Vintage Cars,Daedalus Designs Imports,\"184, chausse de Tournai\",Lille,France",
    "10188,48,100,1,5512.32,11/18/2004 0:00,Shipped,Ships,Euro+ Shopping Channel,\"C/ Moralzarzal, 86\",Madrid,Spain",
    "10201,22,98.57,2,2168.54,12/1/2005 0:00,Shipped,Planes,Mini Wheels Co.,5557 North Pendale Street,San Francisco,USA",
    "10211,41,bad,14,4708.44,1/15/2005 0:00,Shipped,Planes,Auto Canal Petit,\"25, rue Lauriston\",Paris,France",
];

fn write_fixture(extra: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for row in ROWS {
        writeln!(file, "{row}").unwrap();
    }
    file.write_all(extra).unwrap();
    file.flush().unwrap();
    file
}

/// One Latin-1 encoded row: "Bergkvist & Söner" / "Luleå".
fn latin1_row() -> Vec<u8> {
    let mut row = b"10222,20,50.00,1,1000,3/3/2005 0:00,Shipped,Ships,Berglunds snabbk".to_vec();
    row.push(0xF6); // ö
    row.extend_from_slice(b"p,Berguvsv");
    row.push(0xE4); // ä
    row.extend_from_slice(b"gen 8,Lule");
    row.push(0xE5); // å
    row.extend_from_slice(b",Sweden\n");
    row
}

fn load_fixture() -> Dataset {
    let file = write_fixture(&latin1_row());
    DataLoader::load(&LoadOptions::new(file.path())).unwrap()
}

#[test]
fn loads_latin1_file_and_drops_bad_rows() {
    let file = write_fixture(&latin1_row());
    let (dataset, summary) = DataLoader::load_with_summary(&LoadOptions::new(file.path())).unwrap();

    assert_eq!(summary.rows_read, 11);
    assert_eq!(summary.rows_dropped, 1);
    assert_eq!(dataset.len(), 10);

    let last = dataset.records().last().unwrap();
    assert_eq!(last.city.as_deref(), Some("Luleå"));
    assert_eq!(last.purchase_address.as_deref(), Some("Berguvsvägen 8"));
}

#[test]
fn utf8_encoding_rejects_latin1_bytes() {
    let file = write_fixture(&latin1_row());
    let options = LoadOptions::new(file.path()).with_encoding(SourceEncoding::utf8());
    assert!(matches!(DataLoader::load(&options), Err(LoadError::Decode { .. })));
}

#[test]
fn missing_file_is_a_load_error() {
    let result = DataLoader::load(&LoadOptions::new("/no/such/sales.csv"));
    assert!(matches!(result, Err(LoadError::Io { .. })));
}

#[test]
fn revenue_is_quantity_times_price_for_every_row() {
    let dataset = load_fixture();
    for r in dataset.records() {
        assert_eq!(r.total_revenue(), r.quantity_ordered as f64 * r.price_each);
    }
    // SALES column is ignored
    assert_eq!(dataset.records()[0].total_revenue(), 30.0 * 95.70);
}

#[test]
fn full_bounds_and_all_products_is_identity() {
    let dataset = load_fixture();
    assert_eq!(dataset.year_bounds(), Some(YearRange::new(2003, 2005)));
    let everything = FilterSelection::everything(&dataset);
    assert_eq!(everything.apply(&dataset), dataset);
}

#[test]
fn empty_product_set_empties_all_aggregations() {
    let dataset = load_fixture();
    let view = filter(&dataset, YearRange::new(2003, 2005), &ProductSet::new());
    assert!(view.is_empty());
    assert!(MetricAggregator::monthly_trend(&view).is_empty());
    assert!(MetricAggregator::product_analysis(&view).is_empty());
    assert!(MetricAggregator::monthly_analysis(&view).is_empty());
    assert!(MetricAggregator::city_analysis(&view).is_empty());
    assert_eq!(MetricAggregator::global_metrics(&view).average_order_value, 0.0);
}

#[test]
fn initial_selection_matches_first_five_products() {
    let dataset = load_fixture();
    let selection = FilterSelection::initial(&dataset);
    let expected: ProductSet = [
        "Motorcycles",
        "Classic Cars",
        "Trucks and Buses",
        "Vintage Cars",
        "Ships",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_eq!(selection.products, expected);
}

#[test]
fn snapshot_over_fixture() {
    let dataset = load_fixture();
    let selection = FilterSelection::everything(&dataset);
    let snap = DashboardSnapshot::compute(&dataset, &selection, &Gazetteer::builtin());

    assert_eq!(snap.filtered_rows, dataset.len());
    assert_eq!(snap.global.total_units, 30 + 34 + 41 + 45 + 49 + 36 + 29 + 48 + 22 + 20);

    assert!(snap.cities.len() <= TOP_CITY_COUNT);
    assert!(snap
        .cities
        .windows(2)
        .all(|w| w[0].total_revenue >= w[1].total_revenue));
    // San Francisco appears twice and tops the table
    assert_eq!(snap.cities[0].city, "San Francisco");

    for row in &snap.geo {
        assert!(Gazetteer::builtin().lookup(&row.city).is_some());
        assert!(snap.cities.iter().any(|c| c.city == row.city));
    }

    let months: Vec<_> = snap.trend.iter().map(|t| t.month).collect();
    let mut sorted = months.clone();
    sorted.sort();
    assert_eq!(months, sorted);
}
