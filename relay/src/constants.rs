//! Read-only tables used when migrating L2 state during a regenesis.

pub const SOLC_BIN_PATH: &str = "https://binaries.soliditylang.org";
pub const EMSCRIPTEN_BUILD_PATH: &str = "https://binaries.soliditylang.org/emscripten-wasm32";
pub const EMSCRIPTEN_BUILD_LIST: &str =
    "https://binaries.soliditylang.org/emscripten-wasm32/list.json";

/// Address prefix of predeployed contracts.
pub const PREDEPLOY: &str = "0x420000000000000000000000000000000000";
/// Address prefix of dead contracts.
pub const DEAD: &str = "0xdeaddeaddeaddeaddeaddeaddeaddeaddead";

pub const EOA_CODE_HASHES: [&str; 2] = [
    "0xa73df79c90ba2496f3440188807022bed5c7e2e826b596d22bcb4e127378835a",
    "0xef2ab076db773ffc554c9f287134123439a5228e92f5b3194a28fec0a0afafe3",
];

pub const ECDSA_CONTRACT_ACCOUNT_PREDEPLOY_SLOT: &str =
    "0x0000000000000000000000004200000000000000000000000000000000000003";

/// EIP-1967 implementation slot
pub const IMPLEMENTATION_KEY: &str =
    "0x360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc";

pub const SKIP: [&str; 2] = [
    // ERC 1820 registry
    "0x1820a4B7618BdE71Dce8cdc73aAB6C95905faD24",
    // gas metadata
    "0x06a506a506a506a506a506a506a506a506a506a5",
];

/// Compiler version reported for deployed L2 contracts => upstream solc release.
pub const COMPILER_VERSIONS_TO_SOLC: [(&str, &str); 8] = [
    ("v0.5.16", "v0.5.16+commit.9c3226ce"),
    ("v0.5.16-alpha.7", "v0.5.16+commit.9c3226ce"),
    ("v0.6.12", "v0.6.12+commit.27d51765"),
    ("v0.7.6", "v0.7.6+commit.7338295f"),
    ("v0.7.6+commit.3b061308", "v0.7.6+commit.7338295f"),
    ("v0.7.6-allow_kall", "v0.7.6+commit.7338295f"),
    ("v0.7.6-no_errors", "v0.7.6+commit.7338295f"),
    ("v0.8.4", "v0.8.4+commit.c7e474f2"),
];

/// Uniswap libraries to be wiped.
pub const UNISWAP_LIBRARIES: [&str; 8] = [
    "0x18F7E3ae7202e93984290e1195810c66e1E276FF",
    "0x17B0F5E5850E7230136Df66c5d49497b8C3bE0c1",
    "0x47405B0D5f88e16701be6dC8aE185FEFaA5dcA2F",
    "0x01D95165C3C730D6B40f55c37e24c7AAC73d5E6f",
    "0x308C3E60585Ad4EAb5b7677BE0566FeaD4cb4746",
    "0x198Dcc7CD919dD33Dd72c3f981Df653750901D75",
    "0x569E8D536EC2dD5988857147c9FCC7d8a08a7DBc",
    "0x042f51014b152C2D2fC9b57E36b16bC744065D8C",
];

/// Uniswap contracts whose code is pulled from L1.
pub const UNISWAP_CONTRACT_ADDRESSES: [&str; 7] = [
    // UniswapV3Factory
    "0x1F98431c8aD98523631AE4a59f267346ea31F984",
    // TickLens
    "0xbfd8137f7d1516D3ea5cA83523914859ec47F573",
    // Quoter
    "0xb27308f9F90D607463bb33eA1BeBb41C27CE5AB6",
    // SwapRouter
    "0xE592427A0AEce92De3Edee1F18E0157C05861564",
    // NFTDescriptor
    "0x42B24A95702b9986e82d421cC3568932790A48Ec",
    // NonfungibleTokenPositionDescriptor
    "0x91ae842A5Ffd8d12023116943e72A606179294f3",
    // NonfungiblePositionManager
    "0xC36442b4a4522E871399CD717aBDD847Ab11FE88",
];

fn has_prefix(addr: &str, prefix: &str) -> bool {
    addr.get(..prefix.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
}

fn contains(table: &[&str], addr: &str) -> bool {
    table.iter().any(|e| e.eq_ignore_ascii_case(addr))
}

pub fn is_predeploy(addr: &str) -> bool {
    has_prefix(addr, PREDEPLOY)
}

pub fn is_dead(addr: &str) -> bool {
    has_prefix(addr, DEAD)
}

pub fn is_skipped(addr: &str) -> bool {
    contains(&SKIP, addr)
}

pub fn is_eoa_code_hash(hash: &str) -> bool {
    contains(&EOA_CODE_HASHES, hash)
}

pub fn is_uniswap_library(addr: &str) -> bool {
    contains(&UNISWAP_LIBRARIES, addr)
}

pub fn is_uniswap_contract(addr: &str) -> bool {
    contains(&UNISWAP_CONTRACT_ADDRESSES, addr)
}

/// Maps a reported compiler version to the solc release used to recompile it.
pub fn solc_version(compiler_version: &str) -> Option<&'static str> {
    COMPILER_VERSIONS_TO_SOLC
        .iter()
        .find(|(reported, _)| *reported == compiler_version)
        .map(|(_, solc)| *solc)
}
