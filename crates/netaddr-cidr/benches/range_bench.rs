use criterion::{black_box, criterion_group, criterion_main, Criterion};
use netaddr_cidr::{ip_range_to_cidrs, IpNetwork};
use netaddr_core::{IpAddress, Version};

fn benchmark_range_to_cidrs(c: &mut Criterion) {
    let start = IpAddress::parse("0.0.0.0").expect("valid address");
    let end = IpAddress::parse("10.255.255.25").expect("valid address");

    c.bench_function("ip_range_to_cidrs_v4", |b| {
        b.iter(|| ip_range_to_cidrs(Version::V4, black_box(&start), black_box(&end)))
    });

    let start6 = IpAddress::parse("2001:db8::1").expect("valid address");
    let end6 = IpAddress::parse("2001:db9::").expect("valid address");

    c.bench_function("ip_range_to_cidrs_v6", |b| {
        b.iter(|| ip_range_to_cidrs(Version::V6, black_box(&start6), black_box(&end6)))
    });
}

fn benchmark_partition(c: &mut Criterion) {
    let target = IpNetwork::parse("1.1.2.0/23").expect("valid CIDR");
    let exclude = IpNetwork::parse("1.1.3.0/32").expect("valid CIDR");

    c.bench_function("partition_around_host", |b| {
        b.iter(|| black_box(&target).partition(black_box(&exclude)))
    });
}

criterion_group!(benches, benchmark_range_to_cidrs, benchmark_partition);
criterion_main!(benches);
