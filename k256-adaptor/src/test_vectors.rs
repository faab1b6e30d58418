//! Test vectors.

use hex_literal::hex;

/// Adaptor pre-signing test vector.
pub struct AdaptorVector {
    /// Secret key
    pub secret_key: [u8; 32],

    /// x-only public key
    pub public_key: [u8; 32],

    /// Auxiliary randomness
    pub aux_rand: [u8; 32],

    /// Message digest
    pub message: [u8; 32],

    /// Adaptor witness `t`; the adaptor point is `t·G`
    pub witness: u64,

    /// Expected pre-signature `parity ‖ x(R0) ‖ s`
    pub pre_signature: [u8; 65],

    /// Expected pre-signature completed with `witness`
    pub completed: [u8; 65],

    /// Is the completed signature also a valid BIP340 signature
    pub completes_to_bip340: bool,
}

/// `SHA256("test")`
pub const MSG_TEST: [u8; 32] =
    hex!("9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08");

/// `SHA256("test2")`
pub const MSG_TEST2: [u8; 32] =
    hex!("60303ae22b998861bce3b28f33eec1be758a213c86c93c076dbe9f558c11c752");

/// Adaptor vectors. The first is the golden vector; the others vary exactly
/// one input against it.
pub const ADAPTOR_VECTORS: &[AdaptorVector] = &[
    // seckey = 1, T = 2G
    AdaptorVector {
        secret_key: hex!("0000000000000000000000000000000000000000000000000000000000000001"),
        public_key: hex!("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798"),
        aux_rand: hex!("0000000000000000000000000000000000000000000000000000000000000001"),
        message: MSG_TEST,
        witness: 2,
        pre_signature: hex!(
            "03
             A4BD905F5F38D975E033DC186C0DB8F7EBA43B00E84D48F217AC84FF377CD91F
             5FD55B82005A8DDA2574E93A112EB8022347E062A85329F74154D24167590E75"
        ),
        completed: hex!(
            "03
             A4BD905F5F38D975E033DC186C0DB8F7EBA43B00E84D48F217AC84FF377CD91F
             5FD55B82005A8DDA2574E93A112EB8022347E062A85329F74154D24167590E77"
        ),
        completes_to_bip340: false,
    },
    // T = 3G
    AdaptorVector {
        secret_key: hex!("0000000000000000000000000000000000000000000000000000000000000001"),
        public_key: hex!("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798"),
        aux_rand: hex!("0000000000000000000000000000000000000000000000000000000000000001"),
        message: MSG_TEST,
        witness: 3,
        pre_signature: hex!(
            "03
             04F9D91656FD92DCA85E153F12DC9AB080C26B7AE221AC19A12184C20BB56C6E
             A5F574EDFDCB4A2CB649F0EC1E6D99921C509AFE9B20724F5C018A3D99DFF4DB"
        ),
        completed: hex!(
            "02
             04F9D91656FD92DCA85E153F12DC9AB080C26B7AE221AC19A12184C20BB56C6E
             A5F574EDFDCB4A2CB649F0EC1E6D99921C509AFE9B20724F5C018A3D99DFF4D8"
        ),
        completes_to_bip340: true,
    },
    // seckey = 2
    AdaptorVector {
        secret_key: hex!("0000000000000000000000000000000000000000000000000000000000000002"),
        public_key: hex!("C6047F9441ED7D6D3045406E95C07CD85C778E4B8CEF3CA7ABAC09B95C709EE5"),
        aux_rand: hex!("0000000000000000000000000000000000000000000000000000000000000001"),
        message: MSG_TEST,
        witness: 2,
        pre_signature: hex!(
            "03
             7372ABC10AAA0944173073979BDBC8B41C6CAC253A2929A12EE229FE9A86F519
             B1E73D683A01C007EB2D66D47E0599632E6D37EC8F98C11DD670AFC56609FCE3"
        ),
        completed: hex!(
            "02
             7372ABC10AAA0944173073979BDBC8B41C6CAC253A2929A12EE229FE9A86F519
             B1E73D683A01C007EB2D66D47E0599632E6D37EC8F98C11DD670AFC56609FCE1"
        ),
        completes_to_bip340: true,
    },
    // msg = SHA256("test2")
    AdaptorVector {
        secret_key: hex!("0000000000000000000000000000000000000000000000000000000000000001"),
        public_key: hex!("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798"),
        aux_rand: hex!("0000000000000000000000000000000000000000000000000000000000000001"),
        message: MSG_TEST2,
        witness: 2,
        pre_signature: hex!(
            "02
             55454F55D4B84C37755DC5FF120C9090BFC89F673B537AA0B2902790C3A5D468
             EEE85CDFD259C08596B3E397C49E38CBF3E6D10426B2F1E3BE855532A287B87B"
        ),
        completed: hex!(
            "03
             55454F55D4B84C37755DC5FF120C9090BFC89F673B537AA0B2902790C3A5D468
             EEE85CDFD259C08596B3E397C49E38CBF3E6D10426B2F1E3BE855532A287B879"
        ),
        completes_to_bip340: false,
    },
];

/// BIP340 signing test vector
pub struct SignVector {
    /// Signing key
    pub secret_key: [u8; 32],

    /// Verifying key
    pub public_key: [u8; 32],

    /// Auxilliary randomness value
    pub aux_rand: [u8; 32],

    /// Message digest
    pub message: [u8; 32],

    /// Expected signature
    pub signature: [u8; 64],
}

/// BIP340 signing test vectors: index 0-3
///
/// From <https://github.com/bitcoin/bips/blob/master/bip-0340/test-vectors.csv>
pub const BIP340_SIGN_VECTORS: &[SignVector] = &[
    // index 0
    SignVector {
        secret_key: hex!("0000000000000000000000000000000000000000000000000000000000000003"),
        public_key: hex!("F9308A019258C31049344F85F89D5229B531C845836F99B08601F113BCE036F9"),
        aux_rand: hex!("0000000000000000000000000000000000000000000000000000000000000000"),
        message: hex!("0000000000000000000000000000000000000000000000000000000000000000"),
        signature: hex!(
            "E907831F80848D1069A5371B402410364BDF1C5F8307B0084C55F1CE2DCA8215
             25F66A4A85EA8B71E482A74F382D2CE5EBEEE8FDB2172F477DF4900D310536C0"
        ),
    },
    // index 1
    SignVector {
        secret_key: hex!("B7E151628AED2A6ABF7158809CF4F3C762E7160F38B4DA56A784D9045190CFEF"),
        public_key: hex!("DFF1D77F2A671C5F36183726DB2341BE58FEAE1DA2DECED843240F7B502BA659"),
        aux_rand: hex!("0000000000000000000000000000000000000000000000000000000000000001"),
        message: hex!("243F6A8885A308D313198A2E03707344A4093822299F31D0082EFA98EC4E6C89"),
        signature: hex!(
            "6896BD60EEAE296DB48A229FF71DFE071BDE413E6D43F917DC8DCF8C78DE3341
             8906D11AC976ABCCB20B091292BFF4EA897EFCB639EA871CFA95F6DE339E4B0A"
        ),
    },
    // index 2
    SignVector {
        secret_key: hex!("C90FDAA22168C234C4C6628B80DC1CD129024E088A67CC74020BBEA63B14E5C9"),
        public_key: hex!("DD308AFEC5777E13121FA72B9CC1B7CC0139715309B086C960E18FD969774EB8"),
        aux_rand: hex!("C87AA53824B4D7AE2EB035A2B5BBBCCC080E76CDC6D1692C4B0B62D798E6D906"),
        message: hex!("7E2D58D8B3BCDF1ABADEC7829054F90DDA9805AAB56C77333024B9D0A508B75C"),
        signature: hex!(
            "5831AAEED7B44BB74E5EAB94BA9D4294C49BCF2A60728D8B4C200F50DD313C1B
             AB745879A5AD954A72C45A91C3A51D3C7ADEA98D82F8481E0E1E03674A6F3FB7"
        ),
    },
    // index 3
    // test fails if msg is reduced modulo p or n
    SignVector {
        secret_key: hex!("0B432B2677937381AEF05BB02A66ECD012773062CF3FA2549E44F58ED2401710"),
        public_key: hex!("25D1DFF95105F5253C4022F628A996AD3A0D95FBF21D468A1B33F8C160D8F517"),
        aux_rand: hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"),
        message: hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"),
        signature: hex!(
            "7EB0509757E246F19449885651611CB965ECC1A187DD51B64FDA1EDC9637D5EC
             97582B9CB13DB3933705B32BA982AF5AF25FD78881EBB32771FC5922EFC66EA3"
        ),
    },
];

/// BIP340 verification test vector
pub struct VerifyVector {
    /// Index of test case
    pub index: u8,

    /// Verifying key
    pub public_key: [u8; 32],

    /// Message digest
    pub message: [u8; 32],

    /// Claimed signature
    pub signature: [u8; 64],

    /// Is signature valid
    pub valid: bool,
}

/// BIP340 verification test vectors: index 4-14
pub const BIP340_VERIFY_VECTORS: &[VerifyVector] = &[
    // index 4
    VerifyVector {
        index: 4,
        public_key: hex!("D69C3509BB99E412E68B0FE8544E72837DFA30746D8BE2AA65975F29D22DC7B9"),
        message: hex!("4DF3C3F68FCC83B27E9D42C90431A72499F17875C81A599B566C9889B9696703"),
        signature: hex!(
            "00000000000000000000003B78CE563F89A0ED9414F5AA28AD0D96D6795F9C63
             76AFB1548AF603B3EB45C9F8207DEE1060CB71C04E80F593060B07D28308D7F4"
        ),
        valid: true,
    },
    // index 5
    // public key not on curve
    VerifyVector {
        index: 5,
        public_key: hex!("EEFDEA4CDB677750A420FEE807EACF21EB9898AE79B9768766E4FAA04A2D4A34"),
        message: hex!("243F6A8885A308D313198A2E03707344A4093822299F31D0082EFA98EC4E6C89"),
        signature: hex!(
            "6CFF5C3BA86C69EA4B7376F31A9BCB4F74C1976089B2D9963DA2E5543E177769
             69E89B4C5564D00349106B8497785DD7D1D713A8AE82B32FA79D5F7FC407D39B"
        ),
        valid: false,
    },
    // index 6
    // has_even_y(R) is false
    VerifyVector {
        index: 6,
        public_key: hex!("DFF1D77F2A671C5F36183726DB2341BE58FEAE1DA2DECED843240F7B502BA659"),
        message: hex!("243F6A8885A308D313198A2E03707344A4093822299F31D0082EFA98EC4E6C89"),
        signature: hex!(
            "FFF97BD5755EEEA420453A14355235D382F6472F8568A18B2F057A1460297556
             3CC27944640AC607CD107AE10923D9EF7A73C643E166BE5EBEAFA34B1AC553E2"
        ),
        valid: false,
    },
    // index 7
    // negated message
    VerifyVector {
        index: 7,
        public_key: hex!("DFF1D77F2A671C5F36183726DB2341BE58FEAE1DA2DECED843240F7B502BA659"),
        message: hex!("243F6A8885A308D313198A2E03707344A4093822299F31D0082EFA98EC4E6C89"),
        signature: hex!(
            "1FA62E331EDBC21C394792D2AB1100A7B432B013DF3F6FF4F99FCB33E0E1515F
             28890B3EDB6E7189B630448B515CE4F8622A954CFE545735AAEA5134FCCDB2BD"
        ),
        valid: false,
    },
    // index 8
    // negated s value
    VerifyVector {
        index: 8,
        public_key: hex!("DFF1D77F2A671C5F36183726DB2341BE58FEAE1DA2DECED843240F7B502BA659"),
        message: hex!("243F6A8885A308D313198A2E03707344A4093822299F31D0082EFA98EC4E6C89"),
        signature: hex!(
            "6CFF5C3BA86C69EA4B7376F31A9BCB4F74C1976089B2D9963DA2E5543E177769
             961764B3AA9B2FFCB6EF947B6887A226E8D7C93E00C5ED0C1834FF0D0C2E6DA6"
        ),
        valid: false,
    },
    // index 9
    // sG - eP is infinite
    VerifyVector {
        index: 9,
        public_key: hex!("DFF1D77F2A671C5F36183726DB2341BE58FEAE1DA2DECED843240F7B502BA659"),
        message: hex!("243F6A8885A308D313198A2E03707344A4093822299F31D0082EFA98EC4E6C89"),
        signature: hex!(
            "0000000000000000000000000000000000000000000000000000000000000000
             123DDA8328AF9C23A94C1FEECFD123BA4FB73476F0D594DCB65C6425BD186051"
        ),
        valid: false,
    },
    // index 10
    // sG - eP is infinite
    VerifyVector {
        index: 10,
        public_key: hex!("DFF1D77F2A671C5F36183726DB2341BE58FEAE1DA2DECED843240F7B502BA659"),
        message: hex!("243F6A8885A308D313198A2E03707344A4093822299F31D0082EFA98EC4E6C89"),
        signature: hex!(
            "0000000000000000000000000000000000000000000000000000000000000001
             7615FBAF5AE28864013C099742DEADB4DBA87F11AC6754F93780D5A1837CF197"
        ),
        valid: false,
    },
    // index 11
    // sig[0:32] is not an X coordinate on the curve
    VerifyVector {
        index: 11,
        public_key: hex!("DFF1D77F2A671C5F36183726DB2341BE58FEAE1DA2DECED843240F7B502BA659"),
        message: hex!("243F6A8885A308D313198A2E03707344A4093822299F31D0082EFA98EC4E6C89"),
        signature: hex!(
            "4A298DACAE57395A15D0795DDBFD1DCB564DA82B0F269BC70A74F8220429BA1D
             69E89B4C5564D00349106B8497785DD7D1D713A8AE82B32FA79D5F7FC407D39B"
        ),
        valid: false,
    },
    // index 12
    // sig[0:32] is equal to field size
    VerifyVector {
        index: 12,
        public_key: hex!("DFF1D77F2A671C5F36183726DB2341BE58FEAE1DA2DECED843240F7B502BA659"),
        message: hex!("243F6A8885A308D313198A2E03707344A4093822299F31D0082EFA98EC4E6C89"),
        signature: hex!(
            "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F
             69E89B4C5564D00349106B8497785DD7D1D713A8AE82B32FA79D5F7FC407D39B"
        ),
        valid: false,
    },
    // index 13
    // sig[32:64] is equal to curve order
    VerifyVector {
        index: 13,
        public_key: hex!("DFF1D77F2A671C5F36183726DB2341BE58FEAE1DA2DECED843240F7B502BA659"),
        message: hex!("243F6A8885A308D313198A2E03707344A4093822299F31D0082EFA98EC4E6C89"),
        signature: hex!(
            "6CFF5C3BA86C69EA4B7376F31A9BCB4F74C1976089B2D9963DA2E5543E177769
             FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141"
        ),
        valid: false,
    },
    // index 14
    // public key is not a valid X coordinate because it exceeds the field size
    VerifyVector {
        index: 14,
        public_key: hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC30"),
        message: hex!("243F6A8885A308D313198A2E03707344A4093822299F31D0082EFA98EC4E6C89"),
        signature: hex!(
            "6CFF5C3BA86C69EA4B7376F31A9BCB4F74C1976089B2D9963DA2E5543E177769
             69E89B4C5564D00349106B8497785DD7D1D713A8AE82B32FA79D5F7FC407D39B"
        ),
        valid: false,
    },
];
