use xdomain_relay::constants::*;

#[test]
fn predeploy_and_dead_prefixes() {
    assert!(is_predeploy("0x4200000000000000000000000000000000000007"));
    assert!(is_predeploy("0x4200000000000000000000000000000000000016"));
    assert!(!is_predeploy("0x1200000000000000000000000000000000000007"));
    assert!(!is_predeploy("0x42"));

    assert!(is_dead("0xDEADDEADDEADDEADDEADDEADDEADDEADDEAD0000"));
    assert!(!is_dead("0x4200000000000000000000000000000000000007"));
}

#[test]
fn address_tables_ignore_case() {
    assert!(is_skipped("0x1820a4b7618bde71dce8cdc73aab6c95905fad24"));
    assert!(is_uniswap_library("0x18f7e3ae7202e93984290e1195810c66e1e276ff"));
    assert!(is_uniswap_contract("0xe592427a0aece92de3edee1f18e0157c05861564"));
    assert!(!is_uniswap_contract("0x18F7E3ae7202e93984290e1195810c66e1E276FF"));
    assert!(is_eoa_code_hash(
        "0xA73DF79C90BA2496F3440188807022BED5C7E2E826B596D22BCB4E127378835A"
    ));
}

#[test]
fn solc_versions() {
    assert_eq!(solc_version("v0.5.16-alpha.7"), Some("v0.5.16+commit.9c3226ce"));
    assert_eq!(solc_version("v0.7.6-allow_kall"), Some("v0.7.6+commit.7338295f"));
    assert_eq!(solc_version("v0.8.4"), Some("v0.8.4+commit.c7e474f2"));
    assert_eq!(solc_version("v0.8.9"), None);
}
