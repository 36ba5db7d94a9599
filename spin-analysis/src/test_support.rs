use std::sync::OnceLock;

use crate::analysis::{analyze, Analysis};

/// A small Spin2 object touching every section kind.
const SAMPLE_SOURCE: &str = r#"{{
  Blinker demo object
}}
CON { timing }
  CLK_FREQ = 200_000_000          ' system clock
  LED_PIN  = 56, BUTTON_PIN = 57
  #0, MODE_SLOW, MODE_FAST[2], MODE_OFF

OBJ
  ser : "jm_serial"               ' debug console

VAR
  long  ticks, stack[32]
  byte  mode

PUB start(pin, rate) : ok | BYTE count, delay
  '' Start blinking on pin
  mode := MODE_FAST
  delay := clkfreq / rate
  ser.start(115_200)
  ok := cogspin(NEWCOG, blink(pin, delay), @stack) + 1

PRI blink(pin, delay) | t
  t := getct()
  repeat
    pintoggle(pin)
    waitct(t += delay)
    ticks++

PUB pulse(pin)
  org
loop    drvnot  pin
        waitx   #100
        djnz    pin, #loop
  end
  ser.str(string("done"))

DAT
        org
entry   mov     pa, #LED_PIN
.wait   drvnot  pa
        waitx   ##CLK_FREQ
        jmp     #.wait
        fit
table   long    MODE_SLOW, MODE_OFF
"#;

struct SampleFixture {
    analysis: Analysis,
}

static SAMPLE_FIXTURE: OnceLock<SampleFixture> = OnceLock::new();

fn sample_fixture() -> &'static SampleFixture {
    SAMPLE_FIXTURE.get_or_init(|| SampleFixture {
        analysis: analyze(SAMPLE_SOURCE),
    })
}

pub fn sample_source() -> &'static str {
    SAMPLE_SOURCE
}

/// The sample analyzed as Spin2.
pub fn sample_analysis() -> &'static Analysis {
    &sample_fixture().analysis
}
