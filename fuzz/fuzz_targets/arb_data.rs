#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use simbridge_core::ArbData;

#[derive(Debug, Arbitrary)]
enum Op {
    SetJson(String),
    Push(Vec<u8>),
    Pop,
    PopStr,
    Insert(i16, Vec<u8>),
    Set(i16, Vec<u8>),
    Remove(i16),
    Get(i16),
    GetStr(i16),
    Clear,
}

fuzz_target!(|ops: Vec<Op>| {
    let mut data = ArbData::new();
    for op in ops {
        let before = data.clone();
        let failed = match op {
            Op::SetJson(text) => data.set_json_str(&text).is_err(),
            Op::Push(bytes) => {
                data.push_arg(bytes);
                false
            }
            Op::Pop => data.pop_arg().is_err(),
            Op::PopStr => match data.pop_arg_str() {
                Ok(s) => {
                    assert!(!s.contains('\0'));
                    false
                }
                Err(_) => true,
            },
            Op::Insert(i, bytes) => data.insert_arg(i as isize, bytes).is_err(),
            Op::Set(i, bytes) => data.set_arg(i as isize, bytes).is_err(),
            Op::Remove(i) => data.remove_arg(i as isize).is_err(),
            Op::Get(i) => data.get_arg(i as isize).is_err(),
            Op::GetStr(i) => data.get_arg_str(i as isize).is_err(),
            Op::Clear => {
                data.clear_args();
                false
            }
        };
        // Failed operations must not mutate the payload.
        if failed {
            assert_eq!(data, before);
        }
        assert!(data.json_str().is_ok());
    }
});
