//! Compiled-in column tables: the raw flow-export schema, the ordered mapping
//! onto the schema the classifiers were trained on, the drop list, and the
//! label vocabulary. None of this is runtime-configurable.

/// Name of the flow identity field, carried through but never fed to a model.
pub const FLOW_ID: &str = "Flow ID";

/// Raw field duplicated before the rename (the training set carries it twice).
pub const FWD_HEADER_LEN: &str = "Fwd Header Len";

/// Internal name for the duplicated column, mapped like any other raw field.
pub const FWD_HEADER_LEN_DUP: &str = "Fwd Header Len1";

/// Headers of one raw flow record, in wire order. Every input line must have
/// exactly this many comma-separated fields.
pub const RAW_HEADERS: &[&str] = &[
    "Flow ID",
    "Src IP",
    "Src Port",
    "Dst IP",
    "Dst Port",
    "Protocol",
    "Timestamp",
    "Flow Duration",
    "Tot Fwd Pkts",
    "Tot Bwd Pkts",
    "TotLen Fwd Pkts",
    "TotLen Bwd Pkts",
    "Fwd Pkt Len Max",
    "Fwd Pkt Len Min",
    "Fwd Pkt Len Mean",
    "Fwd Pkt Len Std",
    "Bwd Pkt Len Max",
    "Bwd Pkt Len Min",
    "Bwd Pkt Len Mean",
    "Bwd Pkt Len Std",
    "Flow Byts/s",
    "Flow Pkts/s",
    "Flow IAT Mean",
    "Flow IAT Std",
    "Flow IAT Max",
    "Flow IAT Min",
    "Fwd IAT Tot",
    "Fwd IAT Mean",
    "Fwd IAT Std",
    "Fwd IAT Max",
    "Fwd IAT Min",
    "Bwd IAT Tot",
    "Bwd IAT Mean",
    "Bwd IAT Std",
    "Bwd IAT Max",
    "Bwd IAT Min",
    "Fwd PSH Flags",
    "Bwd PSH Flags",
    "Fwd URG Flags",
    "Bwd URG Flags",
    "Fwd Header Len",
    "Bwd Header Len",
    "Fwd Pkts/s",
    "Bwd Pkts/s",
    "Pkt Len Min",
    "Pkt Len Max",
    "Pkt Len Mean",
    "Pkt Len Std",
    "Pkt Len Var",
    "FIN Flag Cnt",
    "SYN Flag Cnt",
    "RST Flag Cnt",
    "PSH Flag Cnt",
    "ACK Flag Cnt",
    "URG Flag Cnt",
    "CWE Flag Count",
    "ECE Flag Cnt",
    "Down/Up Ratio",
    "Pkt Size Avg",
    "Fwd Seg Size Avg",
    "Bwd Seg Size Avg",
    "Fwd Byts/b Avg",
    "Fwd Pkts/b Avg",
    "Fwd Blk Rate Avg",
    "Bwd Byts/b Avg",
    "Bwd Pkts/b Avg",
    "Bwd Blk Rate Avg",
    "Subflow Fwd Pkts",
    "Subflow Fwd Byts",
    "Subflow Bwd Pkts",
    "Subflow Bwd Byts",
    "Init Fwd Win Byts",
    "Init Bwd Win Byts",
    "Fwd Act Data Pkts",
    "Fwd Seg Size Min",
    "Active Mean",
    "Active Std",
    "Active Max",
    "Active Min",
    "Idle Mean",
    "Idle Std",
    "Idle Max",
    "Idle Min",
    "Label",
];

/// Ordered raw→model column mapping. Pair order is the *training* schema
/// order; the mapped names keep the training set's leading spaces and are
/// stripped after the rename, exactly as the models saw them fitted.
/// `Fwd Header Len1` is the duplicate injected by the normalizer.
pub const COLUMN_MAPPING: &[(&str, &str)] = &[
    ("Flow ID", "Flow ID"),
    ("Src IP", " Source IP"),
    ("Src Port", " Source Port"),
    ("Dst IP", " Destination IP"),
    ("Dst Port", " Destination Port"),
    ("Protocol", " Protocol"),
    ("Timestamp", " Timestamp"),
    ("Flow Duration", " Flow Duration"),
    ("Tot Fwd Pkts", " Total Fwd Packets"),
    ("Tot Bwd Pkts", " Total Backward Packets"),
    ("TotLen Fwd Pkts", "Total Length of Fwd Packets"),
    ("TotLen Bwd Pkts", " Total Length of Bwd Packets"),
    ("Fwd Pkt Len Max", " Fwd Packet Length Max"),
    ("Fwd Pkt Len Min", " Fwd Packet Length Min"),
    ("Fwd Pkt Len Mean", " Fwd Packet Length Mean"),
    ("Fwd Pkt Len Std", " Fwd Packet Length Std"),
    ("Bwd Pkt Len Max", "Bwd Packet Length Max"),
    ("Bwd Pkt Len Min", " Bwd Packet Length Min"),
    ("Bwd Pkt Len Mean", " Bwd Packet Length Mean"),
    ("Bwd Pkt Len Std", " Bwd Packet Length Std"),
    ("Flow Byts/s", "Flow Bytes/s"),
    ("Flow Pkts/s", " Flow Packets/s"),
    ("Flow IAT Mean", " Flow IAT Mean"),
    ("Flow IAT Std", " Flow IAT Std"),
    ("Flow IAT Max", " Flow IAT Max"),
    ("Flow IAT Min", " Flow IAT Min"),
    ("Fwd IAT Tot", "Fwd IAT Total"),
    ("Fwd IAT Mean", " Fwd IAT Mean"),
    ("Fwd IAT Std", " Fwd IAT Std"),
    ("Fwd IAT Max", " Fwd IAT Max"),
    ("Fwd IAT Min", " Fwd IAT Min"),
    ("Bwd IAT Tot", "Bwd IAT Total"),
    ("Bwd IAT Mean", " Bwd IAT Mean"),
    ("Bwd IAT Std", " Bwd IAT Std"),
    ("Bwd IAT Max", " Bwd IAT Max"),
    ("Bwd IAT Min", " Bwd IAT Min"),
    ("Fwd PSH Flags", "Fwd PSH Flags"),
    ("Bwd PSH Flags", " Bwd PSH Flags"),
    ("Fwd URG Flags", " Fwd URG Flags"),
    ("Bwd URG Flags", " Bwd URG Flags"),
    ("Fwd Header Len", " Fwd Header Length"),
    ("Bwd Header Len", " Bwd Header Length"),
    ("Fwd Pkts/s", "Fwd Packets/s"),
    ("Bwd Pkts/s", " Bwd Packets/s"),
    ("Pkt Len Min", " Min Packet Length"),
    ("Pkt Len Max", " Max Packet Length"),
    ("Pkt Len Mean", " Packet Length Mean"),
    ("Pkt Len Std", " Packet Length Std"),
    ("Pkt Len Var", " Packet Length Variance"),
    ("FIN Flag Cnt", "FIN Flag Count"),
    ("SYN Flag Cnt", " SYN Flag Count"),
    ("RST Flag Cnt", " RST Flag Count"),
    ("PSH Flag Cnt", " PSH Flag Count"),
    ("ACK Flag Cnt", " ACK Flag Count"),
    ("URG Flag Cnt", " URG Flag Count"),
    ("CWE Flag Count", " CWE Flag Count"),
    ("ECE Flag Cnt", " ECE Flag Count"),
    ("Down/Up Ratio", " Down/Up Ratio"),
    ("Pkt Size Avg", " Average Packet Size"),
    ("Fwd Seg Size Avg", " Avg Fwd Segment Size"),
    ("Bwd Seg Size Avg", " Avg Bwd Segment Size"),
    ("Fwd Header Len1", " Fwd Header Length.1"),
    ("Fwd Byts/b Avg", "Fwd Avg Bytes/Bulk"),
    ("Fwd Pkts/b Avg", " Fwd Avg Packets/Bulk"),
    ("Fwd Blk Rate Avg", " Fwd Avg Bulk Rate"),
    ("Bwd Byts/b Avg", " Bwd Avg Bytes/Bulk"),
    ("Bwd Pkts/b Avg", " Bwd Avg Packets/Bulk"),
    ("Bwd Blk Rate Avg", "Bwd Avg Bulk Rate"),
    ("Subflow Fwd Pkts", "Subflow Fwd Packets"),
    ("Subflow Fwd Byts", " Subflow Fwd Bytes"),
    ("Subflow Bwd Pkts", " Subflow Bwd Packets"),
    ("Subflow Bwd Byts", " Subflow Bwd Bytes"),
    ("Init Fwd Win Byts", "Init_Win_bytes_forward"),
    ("Init Bwd Win Byts", " Init_Win_bytes_backward"),
    ("Fwd Act Data Pkts", " act_data_pkt_fwd"),
    ("Fwd Seg Size Min", " min_seg_size_forward"),
    ("Active Mean", "Active Mean"),
    ("Active Std", " Active Std"),
    ("Active Max", " Active Max"),
    ("Active Min", " Active Min"),
    ("Idle Mean", "Idle Mean"),
    ("Idle Std", " Idle Std"),
    ("Idle Max", " Idle Max"),
    ("Idle Min", " Idle Min"),
    ("Label", " Label"),
];

/// Mapped columns removed before standardization (identity fields and the
/// ground-truth label, compared after stripping). The duplicated
/// `Fwd Header Length.1` stays: the scaler was fitted with it present.
pub const DROP_COLUMNS: &[&str] = &[
    "Flow ID",
    "Source IP",
    "Source Port",
    "Destination IP",
    "Timestamp",
    "Label",
];

/// Fixed label vocabulary. The encoder artifact is authoritative at runtime;
/// this list backs the unloaded-registry fallback path only.
pub const LABELS: &[&str] = &[
    "BENIGN",
    "DrDoS_DNS",
    "DrDoS_LDAP",
    "DrDoS_MSSQL",
    "DrDoS_NTP",
    "DrDoS_NetBIOS",
    "DrDoS_SNMP",
    "DrDoS_SSDP",
    "DrDoS_UDP",
    "Syn",
    "TFTP",
    "UDP-lag",
    "WebDDoS",
];

/// Layer-0 base classifier ids, in invocation and concatenation order.
pub const LAYER0_IDS: &[&str] = &["NN", "RF", "DT", "KN", "GB"];

/// Layer-1 meta-classifier ids, in invocation order.
pub const LAYER1_IDS: &[&str] = &["M1", "M2", "M3"];
