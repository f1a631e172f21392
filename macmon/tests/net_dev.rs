//! Drop counters parsed from a /proc/net/dev dump.
use macmon::sampler::parse_net_dev_drops;

const SAMPLE: &str = "Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo: 1000 10 0 0 0 0 0 0 1000 10 0 0 0 0 0 0
  eth0: 987654 1234 1 7 0 0 0 12 123456 987 0 5 0 0 0 0
";

#[test]
fn sums_rx_and_tx_drops() {
    assert_eq!(parse_net_dev_drops(SAMPLE), Some(12));
}

#[test]
fn no_interfaces_means_unknown() {
    let headers_only: String = SAMPLE.lines().take(2).collect::<Vec<_>>().join("\n");
    assert_eq!(parse_net_dev_drops(&headers_only), None);
    assert_eq!(parse_net_dev_drops(""), None);
}
