//! Network lookups through the C ABI against the live mock server.

use std::ffi::{CStr, CString};
use std::net::SocketAddr;
use std::os::raw::c_char;

use ip2c_ffi::types::FfiErrorCode;
use ip2c_ffi::*;
use mock_server::MockConfig;

fn start_server(config: MockConfig) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, config).await
        })
        .unwrap();
    });

    addr
}

fn read(s: *const c_char) -> String {
    unsafe { CStr::from_ptr(s) }.to_str().unwrap().to_string()
}

#[test]
fn lookups_over_the_network() {
    let addr = start_server(MockConfig::default());
    let url = CString::new(format!("http://{addr}")).unwrap();
    let client = ip2c_client_new(url.as_ptr());

    let ip = CString::new("8.8.8.8").unwrap();
    let result = ip2c_lookup_ipv4(client, ip.as_ptr());
    let r = unsafe { &*result };
    assert_eq!(r.error_code, FfiErrorCode::Ok);
    assert_eq!(read(unsafe { &*r.country }.full_name), "United States");
    ip2c_free_result(result);

    // 1.1.1.1
    let result = ip2c_lookup_decimal(client, 16843009);
    let r = unsafe { &*result };
    assert_eq!(read(unsafe { &*r.country }.two_letter_code), "AU");
    ip2c_free_result(result);

    let result = ip2c_lookup_self(client);
    let r = unsafe { &*result };
    assert_eq!(read(unsafe { &*r.country }.three_letter_code), "AUS");
    ip2c_free_result(result);

    let bad = CString::new("a.b.c.d").unwrap();
    let result = ip2c_lookup_ipv4(client, bad.as_ptr());
    let r = unsafe { &*result };
    assert_eq!(r.error_code, FfiErrorCode::WrongInput);
    assert!(r.country.is_null());
    ip2c_free_result(result);

    ip2c_client_free(client);
}

#[test]
fn timeout_reports_transport_error() {
    let config = MockConfig {
        delay: std::time::Duration::from_secs(5),
        ..MockConfig::default()
    };
    let addr = start_server(config);
    let url = CString::new(format!("http://{addr}")).unwrap();
    let client = ip2c_client_new_with_timeout(url.as_ptr(), 10);

    let result = ip2c_lookup_self(client);
    let r = unsafe { &*result };
    assert_eq!(r.error_code, FfiErrorCode::Transport);
    assert!(!r.error_message.is_null());
    ip2c_free_result(result);

    ip2c_client_free(client);
}
