/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// Keys held from the command line are named by the left 4 alphanumeric
/// columns of a QWERTY keyboard, case insensitive.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  <-  |Q|W|E|R|
/// |7|8|9|E|  <-  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
pub fn keymap(key: char) -> Option<u8> {
    let code = match key.to_ascii_lowercase() {
        'x' => 0x0,
        '1' => 0x1,
        '2' => 0x2,
        '3' => 0x3,
        'q' => 0x4,
        'w' => 0x5,
        'e' => 0x6,
        'a' => 0x7,
        's' => 0x8,
        'd' => 0x9,
        'z' => 0xA,
        'c' => 0xB,
        '4' => 0xC,
        'r' => 0xD,
        'f' => 0xE,
        'v' => 0xF,
        _ => return None,
    };
    Some(code)
}
