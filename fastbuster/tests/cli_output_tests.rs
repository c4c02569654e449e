use fastbuster::{print_devices, print_partitions};
use fastbuster_core::DeviceGateway;
use fastbuster_hal::{FakeHal, FakeResponse};

#[test]
fn devices_are_printed_tab_separated() {
    let hal = FakeHal::new();
    hal.respond(
        &["devices"],
        FakeResponse::success("AAA111\tfastboot\nBBB222\tfastboot\n"),
    );
    let mut out = Vec::new();
    print_devices(&DeviceGateway::new(hal), &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "AAA111\tfastboot\nBBB222\tfastboot\n"
    );
}

#[test]
fn devices_failure_is_an_error() {
    let hal = FakeHal::new();
    hal.respond(&["devices"], FakeResponse::NotFound);
    let mut out = Vec::new();
    let err = print_devices(&DeviceGateway::new(hal), &mut out).unwrap_err();
    assert!(err.to_string().contains("Command not found"));
    assert!(out.is_empty());
}

#[test]
fn partitions_for_requested_serial() {
    let hal = FakeHal::new();
    hal.respond(
        &["devices"],
        FakeResponse::success("AAA111\tfastboot\nBBB222\tfastboot\n"),
    );
    hal.respond(
        &["getvar", "all"],
        FakeResponse::success(
            "(bootloader) partition-vendor_b:raw\n(bootloader) partition-boot_b:raw\n",
        ),
    );
    let mut out = Vec::new();
    print_partitions(&DeviceGateway::new(hal.clone()), Some("BBB222"), &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "boot_b\traw\nvendor_b\traw\n"
    );
    assert!(hal.has_operation(|op| op.args() == ["-s", "BBB222", "getvar", "all"]));
}

#[test]
fn partitions_without_device_is_an_error() {
    let hal = FakeHal::new();
    let mut out = Vec::new();
    let err = print_partitions(&DeviceGateway::new(hal), None, &mut out).unwrap_err();
    assert_eq!(err.to_string(), "No device in fastboot mode");
}
