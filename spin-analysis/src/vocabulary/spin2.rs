//! Propeller 2: Spin2 and PASM2.

use super::{Dialect, Vocabulary, WordSet};
use crate::builtins::{
    described, method, usage, DocTable, BLOCK_NAMES, FLOAT_CONVERSIONS, LITERAL_CONSTANTS,
    STORAGE_SPECIALS,
};

pub(super) static RULES: Vocabulary = Vocabulary {
    dialect: Dialect::Spin2,
    storage_types: WordSet::new(&["byte", "word", "long", "bytefit", "wordfit"]),
    align_types: WordSet::new(&["alignl", "alignw"]),
    reserved_pasm_symbols: WordSet::new(&["org", "orgf", "orgh", "fit", "end"]),
    pasm_reserved_words: WordSet::new(&[
        "ijmp1", "ijmp2", "ijmp3", "iret1", "iret2", "iret3", "ptra", "ptrb", "addpins",
        "clkfreq_", "pa", "pb", "clkfreq", "_clkfreq", "round", "float", "trunc", "dira", "dirb",
        "ina", "inb", "outa", "outb", "fvar", "fvars", "addbits", "true", "false", "_rcfast",
        "_rcslow", "_xinfreq", "_xtlfreq",
    ]),
    pasm_conditionals: WordSet::new(&["wc", "wz", "wcz", "xorc", "xorz", "orc", "orz", "andc", "andz"]),
    instructions: WordSet::new(&[
        "abs", "add", "addct1", "addct2", "addct3", "addpix", "adds", "addsx", "addx", "akpin",
        "allowi", "altb", "altd", "altgb", "altgn", "altgw", "alti", "altr", "alts", "altsb",
        "altsn", "altsw", "and", "andn", "augd", "augs", "bitc", "bith", "bitl", "bitnc",
        "bitnot", "bitnz", "bitrnd", "bitz", "blnpix", "bmask", "brk", "call", "calla", "callb",
        "calld", "callpa", "callpb", "cmp", "cmpm", "cmpr", "cmps", "cmpsub", "cmpsx", "cmpx",
        "cogatn", "cogbrk", "cogid", "coginit", "cogstop", "crcbit", "crcnib", "decmod", "decod",
        "dirc", "dirh", "dirl", "dirnc", "dirnot", "dirnz", "dirrnd", "dirz", "djf", "djnf",
        "djnz", "djz", "drvc", "drvh", "drvl", "drvnc", "drvnot", "drvnz", "drvrnd", "drvz",
        "encod", "execf", "fblock", "fge", "fges", "fle", "fles", "fltc", "flth", "fltl", "fltnc",
        "fltnot", "fltnz", "fltrnd", "fltz", "getbrk", "getbyte", "getct", "getnib", "getptr",
        "getqx", "getqy", "getrnd", "getscp", "getword", "getxacc", "hubset", "ijnz", "ijz",
        "incmod", "jatn", "jct1", "jct2", "jct3", "jfbw", "jint", "jmp", "jmprel", "jnatn",
        "jnct1", "jnct2", "jnct3", "jnfbw", "jnint", "jnpat", "jnqmt", "jnse1", "jnse2", "jnse3",
        "jnse4", "jnxfi", "jnxmt", "jnxrl", "jnxro", "jpat", "jqmt", "jse1", "jse2", "jse3",
        "jse4", "jxfi", "jxmt", "jxrl", "jxro", "loc", "locknew", "lockrel", "lockret", "locktry",
        "mergeb", "mergew", "mixpix", "modc", "modcz", "modz", "mov", "movbyts", "mul", "mulpix",
        "muls", "muxc", "muxnc", "muxnibs", "muxnits", "muxnz", "muxq", "muxz", "neg", "negc",
        "negnc", "negnz", "negz", "not", "ones", "or", "outc", "outh", "outl", "outnc", "outnot",
        "outnz", "outrnd", "outz", "pop", "popa", "popb", "push", "pusha", "pushb", "qdiv",
        "qexp", "qfrac", "qlog", "qmul", "qrotate", "qsqrt", "qvector", "rcl", "rcr", "rczl",
        "rczr", "rdbyte", "rdfast", "rdlong", "rdlut", "rdpin", "rdword", "rep", "rev", "rfbyte",
        "rflong", "rfvar", "rfvars", "rfword", "rgbexp", "rgbsqz", "rol", "rolbyte", "rolnib",
        "rolword", "ror", "rqpin", "sal", "sar", "sca", "scas", "setbyte", "setcfrq", "setci",
        "setcmod", "setcq", "setcy", "setd", "setdacs", "setint1", "setint2", "setint3",
        "setluts", "setnib", "setpat", "setpiv", "setpix", "setq", "setq2", "setr", "sets",
        "setscp", "setse1", "setse2", "setse3", "setse4", "setword", "setxfrq", "seussf",
        "seussr", "shl", "shr", "signx", "skip", "skipf", "splitb", "splitw", "sub", "subr",
        "subs", "subsx", "subx", "sumc", "sumnc", "sumnz", "sumz", "test", "testb", "testbn",
        "testn", "testp", "testpn", "tjf", "tjnf", "tjns", "tjnz", "tjs", "tjv", "tjz", "waitx",
        "wfbyte", "wflong", "wfword", "wmlong", "wrbyte", "wrc", "wrfast", "wrlong", "wrlut",
        "wrnc", "wrnz", "wrpin", "wrword", "wrz", "wxpin", "wypin", "xcont", "xinit", "xor",
        "xoro32", "xzero", "zerox",
    ]),
    no_operand_instructions: WordSet::new(&[
        "nop", "resi3", "resi2", "resi1", "resi0", "reti3", "reti2", "reti1", "reti0", "xstop",
        "allowi", "stalli", "trgint1", "trgint2", "trgint3", "nixint1", "nixint2", "nixint3",
        "ret", "reta", "retb", "pollint", "pollct1", "pollct2", "pollct3", "pollse1", "pollse2",
        "pollse3", "pollse4", "pollpat", "pollfbw", "pollxmt", "pollxfi", "pollxro", "pollxrl",
        "pollatn", "pollqmt", "waitint", "waitct1", "waitct2", "waitct3", "waitse1", "waitse2",
        "waitse3", "waitse4", "waitpat", "waitfbw", "waitxmt", "waitxfi", "waitxro", "waitxrl",
        "waitatn",
    ]),
    illegal_inline_directives: WordSet::new(&["alignw", "alignl", "file", "orgh"]),
    builtin_constants: WordSet::new(&[
        "true", "false", "posx", "negx", "pi", "newcog", "cogexec", "hubexec", "cogexec_new",
        "hubexec_new", "cogexec_new_pair", "hubexec_new_pair",
        // streamer modes
        "x_16p_2dac8_wfword", "x_16p_4dac4_wfword", "x_1adc8_0p_1dac8_wfbyte",
        "x_1adc8_8p_2dac8_wfword", "x_1p_1dac1_wfbyte", "x_2adc8_0p_2dac8_wfword",
        "x_2adc8_16p_4dac8_wflong", "x_2p_1dac2_wfbyte", "x_2p_2dac1_wfbyte", "x_32p_4dac8_wflong",
        "x_4adc8_0p_4dac8_wflong", "x_4p_1dac4_wfbyte", "x_4p_2dac2_wfbyte", "x_4p_4dac1_wfbyte",
        "x_8p_1dac8_wfbyte", "x_8p_2dac4_wfbyte", "x_8p_4dac2_wfbyte", "x_alt_off", "x_alt_on",
        "x_dacs_0n0_0n0", "x_dacs_0n0_x_x", "x_dacs_0_0_0_0", "x_dacs_0_0_x_x", "x_dacs_0_x_x_x",
        "x_dacs_1n1_0n0", "x_dacs_1_0_1_0", "x_dacs_1_0_x_x", "x_dacs_3_2_1_0", "x_dacs_off",
        "x_dacs_x_0_x_x", "x_dacs_x_x_0n0", "x_dacs_x_x_0_0", "x_dacs_x_x_0_x", "x_dacs_x_x_1_0",
        "x_dacs_x_x_x_0", "x_dds_goertzel_sinc1", "x_dds_goertzel_sinc2", "x_imm_16x2_1dac2",
        "x_imm_16x2_2dac1", "x_imm_16x2_lut", "x_imm_1x32_4dac8", "x_imm_2x16_2dac8",
        "x_imm_2x16_4dac4", "x_imm_32x1_1dac1", "x_imm_32x1_lut", "x_imm_4x8_1dac8",
        "x_imm_4x8_2dac4", "x_imm_4x8_4dac2", "x_imm_4x8_lut", "x_imm_8x4_1dac4",
        "x_imm_8x4_2dac2", "x_imm_8x4_4dac1", "x_imm_8x4_lut", "x_pins_off", "x_pins_on",
        "x_rfbyte_1p_1dac1", "x_rfbyte_2p_1dac2", "x_rfbyte_2p_2dac1", "x_rfbyte_4p_1dac4",
        "x_rfbyte_4p_2dac2", "x_rfbyte_4p_4dac1", "x_rfbyte_8p_1dac8", "x_rfbyte_8p_2dac4",
        "x_rfbyte_8p_4dac2", "x_rfbyte_luma8", "x_rfbyte_rgb8", "x_rfbyte_rgbi8",
        "x_rflong_16x2_lut", "x_rflong_32p_4dac8", "x_rflong_32x1_lut", "x_rflong_4x8_lut",
        "x_rflong_8x4_lut", "x_rflong_rgb24", "x_rfword_16p_2dac8", "x_rfword_16p_4dac4",
        "x_rfword_rgb16", "x_write_off", "x_write_on",
        // smart pin modes
        "p_adc", "p_adc_100x", "p_adc_10x", "p_adc_1x", "p_adc_30x", "p_adc_3x", "p_adc_ext",
        "p_adc_float", "p_adc_gio", "p_adc_scope", "p_adc_vio", "p_async_io", "p_async_rx",
        "p_async_tx", "p_bitdac", "p_channel", "p_compare_ab", "p_compare_ab_fb",
        "p_counter_highs", "p_counter_periods", "p_counter_ticks", "p_count_highs",
        "p_count_rises", "p_dac_124r_3v", "p_dac_600r_2v", "p_dac_75r_2v", "p_dac_990r_3v",
        "p_dac_dither_pwm", "p_dac_dither_rnd", "p_dac_noise", "p_events_ticks", "p_high_100ua",
        "p_high_10ua", "p_high_150k", "p_high_15k", "p_high_1k5", "p_high_1ma", "p_high_fast",
        "p_high_float", "p_high_ticks", "p_invert_a", "p_invert_b", "p_invert_in",
        "p_invert_output", "p_level_a", "p_level_a_fbn", "p_level_a_fbp", "p_local_a",
        "p_local_b", "p_logic_a", "p_logic_a_fb", "p_logic_b_fb", "p_low_100ua", "p_low_10ua",
        "p_low_150k", "p_low_15k", "p_low_1k5", "p_low_1ma", "p_low_fast", "p_low_float",
        "p_minus1_a", "p_minus1_b", "p_minus2_a", "p_minus2_b", "p_minus3_a", "p_minus3_b",
        "p_nco_duty", "p_nco_freq", "p_normal", "p_oe", "p_outbit_a", "p_outbit_b",
        "p_periods_highs", "p_periods_ticks", "p_plus1_a", "p_plus1_b", "p_plus2_a", "p_plus2_b",
        "p_plus3_a", "p_plus3_b", "p_pulse", "p_pwm_sawtooth", "p_pwm_smps", "p_pwm_triangle",
        "p_quadrature", "p_reg_down", "p_reg_up", "p_repository", "p_schmitt_a",
        "p_schmitt_a_fb", "p_schmitt_b_fb", "p_state_ticks", "p_sync_io", "p_sync_rx",
        "p_sync_tx", "p_transition", "p_true_a", "p_true_b", "p_true_in", "p_true_output",
        "p_tt_00", "p_tt_01", "p_tt_10", "p_tt_11", "p_usb_pair",
        // event sources
        "event_atn", "event_ct1", "event_ct2", "event_ct3", "event_fbw", "event_int", "event_pat",
        "event_qmt", "event_se1", "event_se2", "event_se3", "event_se4", "event_xfi", "event_xmt",
        "event_xrl", "event_xro",
    ]),
    builtin_variables: WordSet::new(&[
        "clkmode", "clkfreq", "varbase", "pr0", "pr1", "pr2", "pr3", "pr4", "pr5", "pr6", "pr7",
        "ijmp1", "ijmp2", "ijmp3", "iret1", "iret2", "iret3", "pa", "pb", "ptra", "ptrb", "dira",
        "dirb", "outa", "outb", "ina", "inb",
    ]),
    builtin_methods: WordSet::new(&[
        "akpin", "bytefill", "bytemove", "call", "clkset", "cogatn", "cogchk", "cogid", "coginit",
        "cogspin", "cogstop", "getct", "getcrc", "getregs", "getrnd", "getsec", "getms", "hubset",
        "lockchk", "locknew", "lockrel", "lockret", "locktry", "longfill", "longmove",
        "lookdown", "lookdownz", "lookup", "lookupz", "muldiv64", "pinclear", "pinf", "pinfloat",
        "pinh", "pinhigh", "pinl", "pinlow", "pinr", "pinread", "pinstart", "pint", "pintoggle",
        "pinw", "pinwrite", "pollatn", "pollct", "polxy", "rdpin", "recv", "regexec", "regload",
        "rotxy", "rqpin", "send", "setregs", "strcomp", "strcopy", "string", "strsize",
        "waitatn", "waitct", "waitms", "waitus", "wordfill", "wordmove", "wrpin", "wxpin",
        "wypin", "xypol", "qsin", "qcos",
    ]),
    binary_operators: WordSet::new(&[
        "sar", "ror", "rol", "rev", "zerox", "signx", "sca", "scas", "frac", "addbits", "addpins",
        "and", "or", "xor",
    ]),
    unary_operators: WordSet::new(&[
        "not", "abs", "fabs", "encod", "decod", "bmask", "ones", "sqrt", "fsqrt", "qlog", "qexp",
    ]),
    float_conversions: WordSet::new(&["float", "round", "trunc"]),
    flow_keywords: WordSet::new(&[
        "if", "ifnot", "elseif", "elseifnot", "else", "while", "repeat", "until", "from", "to",
        "step", "next", "quit", "case", "case_fast", "other", "abort", "return",
    ]),
    docs: &[
        &BLOCK_NAMES,
        &FLOAT_CONVERSIONS,
        &LITERAL_CONSTANTS,
        &SYSTEM_VARIABLES,
        &STORAGE_TYPES,
        &STORAGE_SPECIALS,
        &REGISTERS,
        &HUB_METHODS,
        &COG_METHODS,
        &PIN_METHODS,
        &TIMING_METHODS,
        &MATH_METHODS,
        &MEMORY_METHODS,
        &STRING_METHODS,
        &PASM_DIRECTIVES,
    ],
};

static SYSTEM_VARIABLES: DocTable = DocTable {
    category: "Spin Variable",
    rows: &[
        described("clkmode", "Current clock mode, located at LONG[$40]"),
        described("clkfreq", "Current clock frequency, located at LONG[$44]"),
        described("varbase", "Object base pointer, @VARBASE is VAR base, used by method-pointer calls"),
    ],
};

static STORAGE_TYPES: DocTable = DocTable {
    category: "Storage Types",
    rows: &[
        described("byte", "8-bit storage"),
        described("word", "16-bit storage"),
        described("long", "32-bit storage"),
        described("bytefit", "8-bit storage, value must fit in a byte"),
        described("wordfit", "16-bit storage, value must fit in a word"),
    ],
};

static REGISTERS: DocTable = DocTable {
    category: "Registers",
    rows: &[
        described("pr0", "Spin2 <-> PASM communication register"),
        described("pr1", "Spin2 <-> PASM communication register"),
        described("pr2", "Spin2 <-> PASM communication register"),
        described("pr3", "Spin2 <-> PASM communication register"),
        described("pr4", "Spin2 <-> PASM communication register"),
        described("pr5", "Spin2 <-> PASM communication register"),
        described("pr6", "Spin2 <-> PASM communication register"),
        described("pr7", "Spin2 <-> PASM communication register"),
        described("ijmp1", "Interrupt 1 jump address"),
        described("ijmp2", "Interrupt 2 jump address"),
        described("ijmp3", "Interrupt 3 jump address"),
        described("iret1", "Interrupt 1 return address"),
        described("iret2", "Interrupt 2 return address"),
        described("iret3", "Interrupt 3 return address"),
        described("pa", "CALLD-imm return, CALLPA parameter, or LOC address"),
        described("pb", "CALLD-imm return, CALLPB parameter, or LOC address"),
        described("ptra", "Pointer A to hub RAM"),
        described("ptrb", "Pointer B to hub RAM"),
        described("dira", "Output enables for P31..P0"),
        described("dirb", "Output enables for P63..P32"),
        described("outa", "Output states for P31..P0"),
        described("outb", "Output states for P63..P32"),
        described("ina", "Input states for P31..P0"),
        described("inb", "Input states for P63..P32"),
    ],
};

const PIN_FIELD: &str = "PinField - a single pin number or a base+count field such as 8 ADDPINS 7";
const LOCK_ID: &str = "LockNum - the lock to operate on (0-15)";
const COG_NUM: &str = "CogNum - the cog to start (0-7), or NEWCOG for the next free cog";

static HUB_METHODS: DocTable = DocTable {
    category: "Hub Method",
    rows: &[
        method(
            "hubset",
            "HUBSET(Value)",
            "Set HUB configuration to Value, or reset the chip",
            &["Value - the new HUB configuration"],
            &[],
        ),
        method(
            "clkset",
            "CLKSET(NewCLKMODE, NewCLKFREQ)",
            "Safely establish a new clock setting, update CLKMODE and CLKFREQ",
            &["NewCLKMODE - the new clock mode", "NewCLKFREQ - the new clock frequency"],
            &[],
        ),
        method(
            "locknew",
            "LOCKNEW() : LockNum",
            "Check out a new lock returning its number",
            &[],
            &["LockNum - the lock checked out (0-15), or -1 if none were available"],
        ),
        method("lockret", "LOCKRET(LockNum)", "Return a lock to the pool", &[LOCK_ID], &[]),
        method(
            "locktry",
            "LOCKTRY(LockNum) : LockState",
            "Try to capture a lock",
            &[LOCK_ID],
            &["LockState - TRUE if the lock was captured"],
        ),
        method("lockrel", "LOCKREL(LockNum)", "Release a captured lock", &[LOCK_ID], &[]),
        method(
            "lockchk",
            "LOCKCHK(LockNum) : LockState",
            "Check a lock's state and owner",
            &[LOCK_ID],
            &["LockState - bit 31 set when captured, owner cog in bits 3..0"],
        ),
        method("cogatn", "COGATN(CogMask)", "Strobe ATN input(s) of cog(s)", &["CogMask - one bit per cog to strobe"], &[]),
        method(
            "pollatn",
            "POLLATN() : AtnFlag",
            "Check if this cog has received an ATN strobe",
            &[],
            &["AtnFlag - TRUE if an ATN strobe was received"],
        ),
        method("waitatn", "WAITATN()", "Wait for this cog to receive an ATN strobe", &[], &[]),
    ],
};

static COG_METHODS: DocTable = DocTable {
    category: "Cog Method",
    rows: &[
        method(
            "coginit",
            "COGINIT(CogNum, PASMaddr, PTRAvalue) : CogID",
            "Start PASM code in a cog",
            &[COG_NUM, "PASMaddr - address of the PASM program", "PTRAvalue - value handed to the new cog in PTRA"],
            &["CogID - the cog started, or -1 if none was free"],
        ),
        method(
            "cogspin",
            "COGSPIN(CogNum, Method({Pars}), StkAddr) : CogID",
            "Start Spin2 method in a cog",
            &[COG_NUM, "Method - the method to run, with its parameters", "StkAddr - address of the stack for the new cog"],
            &["CogID - the cog started, or -1 if none was free"],
        ),
        method("cogstop", "COGSTOP(CogNum)", "Stop cog CogNum", &["CogNum - the cog to stop"], &[]),
        method("cogid", "COGID() : CogNum", "Get this cog's number", &[], &["CogNum - this cog's number (0-7)"]),
        method(
            "cogchk",
            "COGCHK(CogNum) : Running",
            "Check if cog CogNum is running",
            &["CogNum - the cog to check"],
            &["Running - TRUE if the cog is running"],
        ),
        method(
            "regexec",
            "REGEXEC(HubAddress)",
            "Load a self-defined chunk of PASM code into registers and call it",
            &["HubAddress - address of the chunk header"],
            &[],
        ),
        method(
            "regload",
            "REGLOAD(HubAddress)",
            "Load a self-defined chunk of PASM code or data into registers",
            &["HubAddress - address of the chunk header"],
            &[],
        ),
        method("call", "CALL(RegisterOrHubAddr)", "Call PASM code at Addr, PASM code should avoid registers $130..$1D7 and LUT", &["RegisterOrHubAddr - where the code starts"], &[]),
        method(
            "getregs",
            "GETREGS(HubAddr, CogAddr, Count)",
            "Move Count registers at CogAddr to LONGs at HubAddr",
            &["HubAddr - destination in hub", "CogAddr - first register", "Count - number of registers"],
            &[],
        ),
        method(
            "setregs",
            "SETREGS(HubAddr, CogAddr, Count)",
            "Move Count LONGs at HubAddr to registers at CogAddr",
            &["HubAddr - source in hub", "CogAddr - first register", "Count - number of registers"],
            &[],
        ),
    ],
};

static PIN_METHODS: DocTable = DocTable {
    category: "Pin Method",
    rows: &[
        method("pinw", "PINW(PinField, Data)", "Drive PinField pin(s) with Data", &[PIN_FIELD, "Data - the output states"], &[]),
        method("pinwrite", "PINWRITE(PinField, Data)", "Drive PinField pin(s) with Data", &[PIN_FIELD, "Data - the output states"], &[]),
        method("pinl", "PINL(PinField)", "Drive PinField pin(s) low", &[PIN_FIELD], &[]),
        method("pinlow", "PINLOW(PinField)", "Drive PinField pin(s) low", &[PIN_FIELD], &[]),
        method("pinh", "PINH(PinField)", "Drive PinField pin(s) high", &[PIN_FIELD], &[]),
        method("pinhigh", "PINHIGH(PinField)", "Drive PinField pin(s) high", &[PIN_FIELD], &[]),
        method("pint", "PINT(PinField)", "Drive and toggle PinField pin(s)", &[PIN_FIELD], &[]),
        method("pintoggle", "PINTOGGLE(PinField)", "Drive and toggle PinField pin(s)", &[PIN_FIELD], &[]),
        method("pinf", "PINF(PinField)", "Float PinField pin(s)", &[PIN_FIELD], &[]),
        method("pinfloat", "PINFLOAT(PinField)", "Float PinField pin(s)", &[PIN_FIELD], &[]),
        method("pinr", "PINR(PinField) : PinStates", "Read PinField pin(s)", &[PIN_FIELD], &["PinStates - the input states"]),
        method("pinread", "PINREAD(PinField) : PinStates", "Read PinField pin(s)", &[PIN_FIELD], &["PinStates - the input states"]),
        method(
            "pinstart",
            "PINSTART(PinField, Mode, Xval, Yval)",
            "Start PinField smart pin(s): DIR=0, then WRPIN=Mode, WXPIN=Xval, WYPIN=Yval, then DIR=1",
            &[PIN_FIELD, "Mode - the smart pin mode", "Xval - value written by WXPIN", "Yval - value written by WYPIN"],
            &[],
        ),
        method("pinclear", "PINCLEAR(PinField)", "Clear PinField smart pin(s): DIR=0, then WRPIN=0", &[PIN_FIELD], &[]),
        method("wrpin", "WRPIN(PinField, Data)", "Write 'mode' register(s) of PinField smart pin(s) with Data", &[PIN_FIELD, "Data - the mode value"], &[]),
        method("wxpin", "WXPIN(PinField, Data)", "Write 'X' register(s) of PinField smart pin(s) with Data", &[PIN_FIELD, "Data - the X value"], &[]),
        method("wypin", "WYPIN(PinField, Data)", "Write 'Y' register(s) of PinField smart pin(s) with Data", &[PIN_FIELD, "Data - the Y value"], &[]),
        method("akpin", "AKPIN(PinField)", "Acknowledge PinField smart pin(s)", &[PIN_FIELD], &[]),
        method("rdpin", "RDPIN(Pin) : Zval", "Read Pin smart pin and acknowledge", &["Pin - the smart pin to read"], &["Zval - the Z result"]),
        method("rqpin", "RQPIN(Pin) : Zval", "Read Pin smart pin without acknowledge", &["Pin - the smart pin to read"], &["Zval - the Z result"]),
    ],
};

static TIMING_METHODS: DocTable = DocTable {
    category: "Timing Method",
    rows: &[
        method("getct", "GETCT() : Count", "Get 32-bit system counter", &[], &["Count - the system counter"]),
        method(
            "pollct",
            "POLLCT(Tick) : Past",
            "Check if system counter has gone past 'Tick'",
            &["Tick - the counter value to compare against"],
            &["Past - TRUE if the counter is past Tick"],
        ),
        method("waitct", "WAITCT(Tick)", "Wait for system counter to get past 'Tick'", &["Tick - the counter value to wait for"], &[]),
        method("waitms", "WAITMS(Milliseconds)", "Wait 'Milliseconds', based on CLKFREQ", &["Milliseconds - time to wait"], &[]),
        method("waitus", "WAITUS(Microseconds)", "Wait 'Microseconds', based on CLKFREQ", &["Microseconds - time to wait"], &[]),
        method("getsec", "GETSEC() : Seconds", "Get seconds since booting", &[], &["Seconds - elapsed seconds"]),
        method("getms", "GETMS() : Milliseconds", "Get milliseconds since booting", &[], &["Milliseconds - elapsed milliseconds"]),
    ],
};

static MATH_METHODS: DocTable = DocTable {
    category: "Math Method",
    rows: &[
        method(
            "rotxy",
            "ROTXY(x, y, angle32bit) : rotx, roty",
            "Rotate (x,y) by angle32bit and return rotated (x,y)",
            &["x - X coordinate", "y - Y coordinate", "angle32bit - rotation, 2^32 units per turn"],
            &["rotx - rotated X", "roty - rotated Y"],
        ),
        method(
            "polxy",
            "POLXY(length, angle32bit) : x, y",
            "Convert (length,angle32bit) to (x,y)",
            &["length - vector length", "angle32bit - vector angle"],
            &["x - X coordinate", "y - Y coordinate"],
        ),
        method(
            "xypol",
            "XYPOL(x, y) : length, angle32bit",
            "Convert (x,y) to (length,angle32bit)",
            &["x - X coordinate", "y - Y coordinate"],
            &["length - vector length", "angle32bit - vector angle"],
        ),
        method(
            "qsin",
            "QSIN(Length, Step, StepsInCircle) : y",
            "Rotate (Length,0) by (Step / StepsInCircle) * 2Pi and return y",
            &["Length - vector length", "Step - position in the circle", "StepsInCircle - steps per full turn"],
            &["y - the sine component"],
        ),
        method(
            "qcos",
            "QCOS(Length, Step, StepsInCircle) : x",
            "Rotate (Length,0) by (Step / StepsInCircle) * 2Pi and return x",
            &["Length - vector length", "Step - position in the circle", "StepsInCircle - steps per full turn"],
            &["x - the cosine component"],
        ),
        method(
            "muldiv64",
            "MULDIV64(mult1, mult2, divisor) : quotient",
            "Divide the 64-bit product of 'mult1' and 'mult2' by 'divisor'",
            &["mult1 - first factor", "mult2 - second factor", "divisor - unsigned divisor"],
            &["quotient - 32-bit quotient"],
        ),
        method("getrnd", "GETRND() : rnd", "Get random long", &[], &["rnd - a random value"]),
        method(
            "getcrc",
            "GETCRC(BytePtr, Poly, Count) : CRC",
            "Compute a CRC of Count bytes starting at BytePtr using a custom polynomial",
            &["BytePtr - start of the data", "Poly - the CRC polynomial", "Count - number of bytes"],
            &["CRC - the computed CRC"],
        ),
    ],
};

static MEMORY_METHODS: DocTable = DocTable {
    category: "Memory Method",
    rows: &[
        method(
            "bytemove",
            "BYTEMOVE(Destination, Source, Count)",
            "Move Count bytes from Source to Destination",
            &["Destination - where to copy to", "Source - where to copy from", "Count - number of BYTEs"],
            &[],
        ),
        method(
            "wordmove",
            "WORDMOVE(Destination, Source, Count)",
            "Move Count words from Source to Destination",
            &["Destination - where to copy to", "Source - where to copy from", "Count - number of WORDs"],
            &[],
        ),
        method(
            "longmove",
            "LONGMOVE(Destination, Source, Count)",
            "Move Count longs from Source to Destination",
            &["Destination - where to copy to", "Source - where to copy from", "Count - number of LONGs"],
            &[],
        ),
        method(
            "bytefill",
            "BYTEFILL(Destination, Value, Count)",
            "Fill Count bytes starting at Destination with Value",
            &["Destination - where to fill", "Value - 8-bit value", "Count - number of BYTEs"],
            &[],
        ),
        method(
            "wordfill",
            "WORDFILL(Destination, Value, Count)",
            "Fill Count words starting at Destination with Value",
            &["Destination - where to fill", "Value - 16-bit value", "Count - number of WORDs"],
            &[],
        ),
        method(
            "longfill",
            "LONGFILL(Destination, Value, Count)",
            "Fill Count longs starting at Destination with Value",
            &["Destination - where to fill", "Value - 32-bit value", "Count - number of LONGs"],
            &[],
        ),
        usage("lookup", "LOOKUP(Index: ExpressionList) : Value", "Lookup value using 1-based index, return 0 if index out of range"),
        usage("lookupz", "LOOKUPZ(Index: ExpressionList) : Value", "Lookup value using 0-based index, return 0 if index out of range"),
        usage("lookdown", "LOOKDOWN(Value: ExpressionList) : Index", "Determine 1-based index of matching value, return 0 if no match"),
        usage("lookdownz", "LOOKDOWNZ(Value: ExpressionList) : Index", "Determine 0-based index of matching value, return 0 if no match"),
    ],
};

static STRING_METHODS: DocTable = DocTable {
    category: "String Method",
    rows: &[
        method(
            "strsize",
            "STRSIZE(Addr) : Size",
            "Count bytes of zero-terminated string at Addr",
            &["Addr - address of zero-terminated string"],
            &["Size - the string length, not including the zero"],
        ),
        method(
            "strcomp",
            "STRCOMP(AddrA, AddrB) : Match",
            "Compare zero-terminated strings at AddrA and AddrB",
            &["AddrA - address of zero-terminated string", "AddrB - address of zero-terminated string"],
            &["Match - TRUE (-1) if match or FALSE (0) if not"],
        ),
        method(
            "strcopy",
            "STRCOPY(Destination, Source, Max)",
            "Copy a zero-terminated string of up to Max characters from Source to Destination",
            &["Destination - where to copy to", "Source - zero-terminated string", "Max - maximum characters to copy"],
            &[],
        ),
        usage("string", "STRING(\"Text\",13) : StringAddress", "Compose a zero-terminated string (quoted characters and values 1..255 allowed)"),
    ],
};

static PASM_DIRECTIVES: DocTable = DocTable {
    category: "Pasm Directive",
    rows: &[
        usage("org", "ORG <Address>", "Set cog-exec mode, address defaults to $000"),
        usage("orgf", "ORGF <Address>", "Fill to cog address with zeros"),
        usage("orgh", "ORGH <Address>", "Set hub-exec mode, address defaults to $00400"),
        usage("fit", "FIT <Address>", "Validate that code fits below the given address"),
        usage("end", "END", "End of inline PASM block"),
        usage("alignw", "ALIGNW", "Align to next word in hub, use after BYTE data"),
        usage("alignl", "ALIGNL", "Align to next long in hub, use after BYTE/WORD data"),
    ],
};
