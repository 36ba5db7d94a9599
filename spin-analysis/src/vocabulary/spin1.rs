//! Propeller 1: Spin and PASM.

use super::{Dialect, Vocabulary, WordSet};
use crate::builtins::{
    described, method, usage, DocTable, BLOCK_NAMES, FLOAT_CONVERSIONS, LITERAL_CONSTANTS,
    STORAGE_SPECIALS,
};

pub(super) static RULES: Vocabulary = Vocabulary {
    dialect: Dialect::Spin1,
    storage_types: WordSet::new(&["byte", "word", "long"]),
    align_types: WordSet::new(&[]),
    reserved_pasm_symbols: WordSet::new(&["org", "fit"]),
    pasm_reserved_words: WordSet::new(&[
        "cnt", "scr", "_clkfreq", "_clkmode", "_xinfreq", "_stack", "_free", "round", "float",
        "trunc", "true", "false", "negx", "pi", "posx",
    ]),
    pasm_conditionals: WordSet::new(&["wc", "wz", "nr", "wr"]),
    instructions: WordSet::new(&[
        "abs", "absneg", "add", "addabs", "adds", "addsx", "addx", "and", "andn", "call", "clkset",
        "cmp", "cmps", "cmpsub", "cmpsx", "cmpx", "cogid", "coginit", "cogstop", "djnz", "hubop",
        "jmp", "jmpret", "lockclr", "locknew", "lockret", "lockset", "max", "maxs", "min", "mins",
        "mov", "movd", "movi", "movs", "muxc", "muxnc", "muxz", "muxnz", "neg", "negc", "negnc",
        "negnz", "negz", "or", "rcl", "rcr", "rdbyte", "rdlong", "rdword", "rev", "rol", "ror",
        "sar", "shl", "shr", "sub", "subabs", "subs", "subsx", "subx", "sumc", "sumnc", "sumnz",
        "sumz", "test", "testn", "tjnz", "tjz", "waitcnt", "waitpeq", "waitpne", "waitvid",
        "wrbyte", "wrlong", "wrword", "xor",
    ]),
    no_operand_instructions: WordSet::new(&["nop", "ret"]),
    illegal_inline_directives: WordSet::new(&["file"]),
    builtin_constants: WordSet::new(&[
        "true", "false", "posx", "negx", "pi", "rcfast", "rcslow", "xinput", "xtal1", "xtal2",
        "xtal3", "pll1x", "pll2x", "pll4x", "pll8x", "pll16x",
    ]),
    builtin_variables: WordSet::new(&[
        "dira", "dirb", "ina", "inb", "outa", "outb", "cnt", "ctra", "ctrb", "frqa", "frqb",
        "phsa", "phsb", "vcfg", "vscl", "par", "spr", "_clkmode", "_clkfreq", "_xinfreq",
        "_stack", "_free", "chipver", "cogid", "clkmode", "clkfreq", "result",
    ]),
    builtin_methods: WordSet::new(&[
        "call", "clkset", "bytemove", "wordmove", "longmove", "bytefill", "wordfill", "longfill",
        "lookup", "lookupz", "lookdown", "lookdownz", "strsize", "strcomp", "locknew", "lockret",
        "lockset", "lockclr", "waitcnt", "waitpeq", "waitpne", "waitvid", "coginit", "cognew",
        "cogstop", "reboot", "string", "constant",
    ]),
    binary_operators: WordSet::new(&["and", "or"]),
    unary_operators: WordSet::new(&["not"]),
    float_conversions: WordSet::new(&["float", "round", "trunc"]),
    flow_keywords: WordSet::new(&[
        "if", "ifnot", "elseif", "elseifnot", "else", "while", "repeat", "until", "from", "to",
        "step", "next", "quit", "case", "other", "abort", "return",
    ]),
    docs: &[
        &BLOCK_NAMES,
        &FLOAT_CONVERSIONS,
        &CLOCK_MODES,
        &CONFIGURATION,
        &LITERAL_CONSTANTS,
        &CLOCK_VARIABLES,
        &METHOD_VARIABLES,
        &DIRECTIVES,
        &STORAGE_TYPES,
        &STORAGE_SPECIALS,
        &REGISTERS,
        &STRING_METHODS,
        &MEMORY_METHODS,
        &INDEX_METHODS,
        &PROCESS_METHODS,
        &COG_METHODS,
        &PASM_DIRECTIVES,
    ],
};

static CLOCK_MODES: DocTable = DocTable {
    category: "_CLKMODE Constant",
    rows: &[
        described("rcfast", "internal fast oscillator. No external parts. May range from 8 MHz to 20 MHz."),
        described(
            "rcslow",
            "internal slow oscillator. Very low power. No external parts. May range from 13 kHz to 33 kHz.",
        ),
        described("xinput", "external clock/osc (XI pin). DC to 80 MHz Input"),
        described("xtal1", "external low-speed crystal. 4 to 16 MHz Crystal/Resonator"),
        described("xtal2", "external medium-speed crystal. 8 to 32 MHz Crystal/Resonator"),
        described("xtal3", "external high-speed crystal. 20 to 60 MHz Crystal/Resonator"),
        described("pll1x", "external frequency times 1"),
        described("pll2x", "external frequency times 2"),
        described("pll4x", "external frequency times 4"),
        described("pll8x", "external frequency times 8"),
        described("pll16x", "external frequency times 16"),
    ],
};

static CONFIGURATION: DocTable = DocTable {
    category: "Application R/O Variable",
    rows: &[
        described("_clkmode", "Application-defined clock mode (read-only)"),
        described("_clkfreq", "Application-defined clock frequency (read-only)"),
        described("_xinfreq", "Application-defined external clock frequency (read-only)"),
        described("_stack", "Application-defined stack space to reserve (read-only)"),
        described("_free", "Application-defined free space to reserve (read-only)"),
        described("chipver", "Propeller chip version number (read-only)"),
        described("cogid", "Current cog's ID number (0-7) (read-only)"),
        described("cnt", "Current 32-bit System Counter value (read-only)"),
    ],
};

static CLOCK_VARIABLES: DocTable = DocTable {
    category: "Spin Variable",
    rows: &[
        described("clkmode", "Current clock mode setting"),
        described("clkfreq", "Current clock frequency"),
        described("clkset", "Set clock mode and clock frequency"),
    ],
};

static METHOD_VARIABLES: DocTable = DocTable {
    category: "Spin Variable",
    rows: &[described("result", "The return value variable for methods")],
};

static DIRECTIVES: DocTable = DocTable {
    category: "Spin Directives",
    rows: &[
        described("string", "Declare in-line string expression; resolved at compile time"),
        described("constant", "Declare in-line constant expression; resolved at compile time"),
    ],
};

static STORAGE_TYPES: DocTable = DocTable {
    category: "Storage Types",
    rows: &[
        described("byte", "8-bit storage"),
        described("word", "16-bit storage"),
        described("long", "32-bit storage"),
    ],
};

static REGISTERS: DocTable = DocTable {
    category: "Registers",
    rows: &[
        described("dira", "Direction Register for 32-bit port A (P0-P31)"),
        described("dirb", "Direction Register for 32-bit port B (P32-P63, future use)"),
        described("ina", "Input Register for 32-bit port A (P0-P31, read only)"),
        described("inb", "Input Register for 32-bit port B (P32-P63, read only, future use)"),
        described("outa", "Output Register for 32-bit port A (P0-P31)"),
        described("outb", "Output Register for 32-bit port B (P32-P63, future use)"),
        described("cnt", "32-bit System Counter Register (read only)"),
        described("ctra", "Counter A Control Register"),
        described("ctrb", "Counter B Control Register"),
        described("frqa", "Counter A Frequency Register"),
        described("frqb", "Counter B Frequency Register"),
        described("phsa", "Counter A Phase-Locked Loop (PLL) Register"),
        described("phsb", "Counter B Phase-Locked Loop (PLL) Register"),
        described("vcfg", "Video Configuration Register"),
        described("vscl", "Video Scale Register"),
        described("par", "Cog Boot Parameter Register (read only)"),
        described("spr", "Special-Purpose Register array; indirect cog register access"),
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
            "STRCOMP(AddrA,AddrB) : Match",
            "Compare zero-terminated strings at AddrA and AddrB",
            &["AddrA - address of zero-terminated string", "AddrB - address of zero-terminated string"],
            &["Match - return TRUE (-1) if match or FALSE (0) if not"],
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
            &[
                "Destination - address of BYTE array to receive values",
                "Source - address of BYTE array to be copied",
                "Count - the number of BYTEs to be copied",
            ],
            &[],
        ),
        method(
            "wordmove",
            "WORDMOVE(Destination, Source, Count)",
            "Move Count words from Source to Destination",
            &[
                "Destination - address of WORD array to receive values",
                "Source - address of WORD array to be copied",
                "Count - the number of WORDs to be copied",
            ],
            &[],
        ),
        method(
            "longmove",
            "LONGMOVE(Destination, Source, Count)",
            "Move Count longs from Source to Destination",
            &[
                "Destination - address of LONG array to receive values",
                "Source - address of LONG array to be copied",
                "Count - the number of LONGs to be copied",
            ],
            &[],
        ),
        method(
            "bytefill",
            "BYTEFILL(Destination, Value, Count)",
            "Fill Count bytes starting at Destination with Value",
            &[
                "Destination - address of BYTE array to receive values",
                "Value - 8-bit value",
                "Count - the number of BYTEs to be filled",
            ],
            &[],
        ),
        method(
            "wordfill",
            "WORDFILL(Destination, Value, Count)",
            "Fill Count words starting at Destination with Value",
            &[
                "Destination - address of WORD array to receive values",
                "Value - 16-bit value",
                "Count - the number of WORDs to be filled",
            ],
            &[],
        ),
        method(
            "longfill",
            "LONGFILL(Destination, Value, Count)",
            "Fill Count longs starting at Destination with Value",
            &[
                "Destination - address of LONG array to receive values",
                "Value - 32-bit value",
                "Count - the number of LONGs to be filled",
            ],
            &[],
        ),
    ],
};

// Parameters of these are separated by ':' so they carry no parameter list.
static INDEX_METHODS: DocTable = DocTable {
    category: "Memory Method",
    rows: &[
        usage(
            "lookup",
            "LOOKUP(Index: ExpressionList) : Value",
            "Lookup value (values and ranges allowed) using 1-based index, return value (0 if index out of range)",
        ),
        usage(
            "lookupz",
            "LOOKUPZ(Index: ExpressionList) : Value",
            "Lookup value (values and ranges allowed) using 0-based index, return value (0 if index out of range)",
        ),
        usage(
            "lookdown",
            "LOOKDOWN(Value: ExpressionList) : Index",
            "Determine 1-based index of matching value (values and ranges allowed), return index (0 if no match)",
        ),
        usage(
            "lookdownz",
            "LOOKDOWNZ(Value: ExpressionList) : Index",
            "Determine 0-based index of matching value (values and ranges allowed), return index (0 if no match)",
        ),
    ],
};

const PIN_STATE: &str = "State - the logic state(s) to compare the pin(s) against. It is a 32-bit value that indicates the high or low states of up to 32 I/O pins";
const PIN_MASK: &str = "Mask - the desired pin(s) to monitor. Mask is a 32-bit value that contains high (1) bits for every I/O pin that should be monitored";
const PIN_PORT: &str = "Port - is a 1-bit value indicating the I/O port to monitor; 0 = Port A, 1 = Port B";

static PROCESS_METHODS: DocTable = DocTable {
    category: "Process Control Method",
    rows: &[
        method(
            "locknew",
            "LOCKNEW : ID",
            "Check out a new lock returning its ID",
            &[],
            &["ID - the ID number (0-7) of the lock checked out (or -1 is none were available)"],
        ),
        method(
            "lockret",
            "LOCKRET(ID)",
            "Release lock back to lock pool, making it available for future LOCKNEW requests",
            &["ID - is the ID number (0-7) of the lock"],
            &[],
        ),
        method(
            "lockset",
            "LOCKSET(ID) : prevState",
            "Set lock to true returning its previous state",
            &["ID - is the ID number (0-7) of the lock to set"],
            &["prevState - state of the lock before it was set"],
        ),
        method(
            "lockclr",
            "LOCKCLR(ID) : prevState",
            "Clear lock to false returning its previous state",
            &["ID - is the ID number (0-7) of the lock to clear"],
            &["prevState - state of the lock before it was cleared"],
        ),
        method(
            "waitcnt",
            "WAITCNT(value)",
            "Wait for System Counter, pausing a cog's execution temporarily",
            &["value - the desired 32-bit System Counter value to wait for"],
            &[],
        ),
        method(
            "waitpeq",
            "WAITPEQ(State, Mask, Port)",
            "Pause a cog's execution until I/O pin(s) match designated state(s)",
            &[PIN_STATE, PIN_MASK, PIN_PORT],
            &[],
        ),
        method(
            "waitpne",
            "WAITPNE(State, Mask, Port)",
            "Pause a cog's execution until I/O pin(s) do not match designated state(s)",
            &[PIN_STATE, PIN_MASK, PIN_PORT],
            &[],
        ),
        method(
            "waitvid",
            "WAITVID(Colors, Pixels)",
            "Pause a cog's execution until its Video Generator is available to take pixel data",
            &[
                "Colors - a long containing four byte-sized color values, each describing the four possible colors of the pixel patterns in Pixels",
                "Pixels - the next 16-pixel by 2-bit (or 32-pixel by 1-bit) pixel pattern to display",
            ],
            &[],
        ),
    ],
};

static COG_METHODS: DocTable = DocTable {
    category: "COG Control Method",
    rows: &[
        method(
            "coginit",
            "COGINIT(CogID, SpinMethod(ParameterList), StackPointer)",
            "Start or restart a cog by ID to run Spin code or Propeller Assembly code",
            &[
                "CogID - the ID (0 - 7) of the cog to start, or restart. A CogID value of 8 - 15 results in the next available cog being started, if possible",
                "SpinMethod - the Spin method (or PASM address) that the affected cog should run",
                "StackPointer - a pointer to memory reserved for stack space (or the PAR value when running PASM)",
            ],
            &[],
        ),
        method(
            "cognew",
            "COGNEW(SpinMethod(ParameterList), StackPointer) : CogID",
            "Start the next available cog to run Spin code or Propeller Assembly code",
            &[
                "SpinMethod - the Spin method (or PASM address) that the affected cog should run",
                "StackPointer - a pointer to memory reserved for stack space (or the PAR value when running PASM)",
            ],
            &["CogID - The ID of the newly started cog (0-7) if successful, or -1 otherwise"],
        ),
        method(
            "cogstop",
            "COGSTOP(CogID)",
            "Stop cog by its ID",
            &["CogID - the ID (0-7) of the cog to stop"],
            &[],
        ),
        method("reboot", "REBOOT", "Reset the Propeller chip", &[], &[]),
    ],
};

static PASM_DIRECTIVES: DocTable = DocTable {
    category: "Pasm Directive",
    rows: &[
        usage(
            "org",
            "ORG <Address>",
            "Adjust compile-time assembly pointer<br>@param `Address` - an optional Cog RAM address (0-495) to assemble the following assembly code with",
        ),
        usage(
            "fit",
            "FIT <Address>",
            "Validate that previous instructions/data fit entirely below a specific address<br>@param `Address` - an optional Cog RAM address (0-$1F0)",
        ),
    ],
};
