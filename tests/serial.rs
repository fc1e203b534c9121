use ld_cluster_bench::Parallelism;

mod common;

macro_rules! define_serial_test {
    ($test_fn:ident) => {
        #[test]
        fn $test_fn() {
            common::$test_fn(Parallelism::Serial);
        }
    };
}

define_serial_test!(test_ld_blocks);
define_serial_test!(test_everything_within_radius);
define_serial_test!(test_nan_correlations_are_unlinked);
define_serial_test!(test_invalid_min_samples);
define_serial_test!(test_sweep_with_dbscan);
define_serial_test!(test_sweep_stops_on_bad_cell);
