//! Benchmark for report reconstruction
//!
//! Sized after a fully populated array: 1000 LUNs, 500 disks, 200 HBAs

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use vnx_inventory::reconstruct::{adapters, disks, volumes};
use vnx_inventory::{parse_volumes, Property};

fn lun_stream(count: usize) -> Vec<Property> {
    let mut props = Vec::with_capacity(count * 8);
    for i in 0..count {
        props.push(Property::new("LOGICAL UNIT NUMBER", "uint64", i.to_string()));
        props.push(Property::new("Name", "string", format!("LUN_{:04}   ", i)));
        props.push(Property::new("UID", "string", "60:06:01:60:3A:B0:2E:00"));
        props.push(Property::new("User Capacity (Blocks)", "uint64", "2147483648"));
        props.push(Property::new("User Capacity (GBs)", "string", "1024.000"));
        props.push(Property::new("Current Owner", "string", "SP A"));
        props.push(Property::new("Pool Name", "string", "Pool 0"));
        props.push(Property::new("Is Thin LUN", "string", "Yes"));
    }
    props
}

fn disk_stream(count: usize) -> Vec<Property> {
    let mut props = Vec::with_capacity(count * 6);
    for i in 0..count {
        props.push(Property::new("", "string", ""));
        props.push(Property::new(
            format!("Bus {} Enclosure {} Disk {}", i % 4, i / 15, i % 15),
            "string",
            "",
        ));
        props.push(Property::new("Vendor Id", "string", "SEAGATE "));
        props.push(Property::new("Serial Number", "string", format!("6SJ{:05}  ", i)));
        props.push(Property::new("Capacity", "uint64", "274845"));
        props.push(Property::new("Drive Type", "string", "SAS"));
    }
    props
}

fn hba_stream(count: usize) -> Vec<Property> {
    let mut props = Vec::with_capacity(count * 16);
    for i in 0..count {
        props.push(Property::new("HBA UID", "string", format!("20:00:00:25:B5:0A:{:02X}", i % 256)));
        props.push(Property::new("Server Name", "string", format!("esx{:03}", i)));
        props.push(Property::new("Information about each port of this HBA", "string", ""));
        for sp in ["SP A", "SP B"] {
            props.push(Property::new("    SP Name", "string", sp));
            props.push(Property::new("    SP Port ID", "uint64", "0"));
            props.push(Property::new("    Logged In", "string", "YES"));
            props.push(Property::new("    Defined", "string", "YES"));
            props.push(Property::new("    StorageGroup Name", "string", "ESX_Cluster"));
        }
    }
    props
}

fn lun_xml(stream: &[Property]) -> String {
    let mut xml = String::from(
        "<CIM><MESSAGE><SIMPLERSP><METHODRESPONSE><PARAMVALUE NAME=\"Response\" TYPE=\"string\"><VALUE>",
    );
    for p in stream {
        xml.push_str(&format!(
            "<PARAMVALUE NAME=\"{}\" TYPE=\"{}\"><VALUE>{}</VALUE></PARAMVALUE>",
            p.name, p.type_tag, p.value
        ));
    }
    xml.push_str(
        "</VALUE></PARAMVALUE><RETURNVALUE><VALUE.NAMEDINSTANCE><INSTANCE>\
         <PROPERTY NAME=\"errorCode\" TYPE=\"uint32\"><VALUE>0</VALUE></PROPERTY>\
         <PROPERTY NAME=\"success\" TYPE=\"boolean\"><VALUE>true</VALUE></PROPERTY>\
         </INSTANCE></VALUE.NAMEDINSTANCE></RETURNVALUE></METHODRESPONSE></SIMPLERSP></MESSAGE></CIM>",
    );
    xml
}

fn bench_reconstruct(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruct");

    let luns = lun_stream(1000);
    group.throughput(Throughput::Elements(luns.len() as u64));
    group.bench_function("volumes_1000", |b| {
        b.iter(|| volumes::reconstruct(black_box(&luns)));
    });

    let drives = disk_stream(500);
    group.throughput(Throughput::Elements(drives.len() as u64));
    group.bench_function("disks_500", |b| {
        b.iter(|| disks::reconstruct(black_box(&drives)));
    });

    let hbas = hba_stream(200);
    group.throughput(Throughput::Elements(hbas.len() as u64));
    group.bench_function("adapters_200", |b| {
        b.iter(|| adapters::reconstruct(black_box(&hbas)));
    });

    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_xml");

    let xml = lun_xml(&lun_stream(1000));
    group.throughput(Throughput::Bytes(xml.len() as u64));
    group.bench_function("lun_list_1000", |b| {
        b.iter(|| parse_volumes(black_box(xml.as_bytes())));
    });

    group.finish();
}

criterion_group!(benches, bench_reconstruct, bench_end_to_end);
criterion_main!(benches);
