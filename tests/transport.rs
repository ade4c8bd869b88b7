use avrasm_rs::image::ByteImage;
use avrasm_rs::transport::{encode_image, paginate, Command, FRAME_LEN, PAGE_SIZE, SAMPLES_PER_EDGE};
use avrasm_rs::{assemble, Artifact, AsmError, AssembleOptions, OutputMode, TransportConfig, TransportError};

const FRAME_SAMPLES: usize = (40 + 1 + FRAME_LEN * 8) * SAMPLES_PER_EDGE;

#[test]
fn two_pages_plus_run() {
    let mut img = ByteImage::new();
    img.load(0, &[0x11; 129]).unwrap();
    let frames = paginate(&img).unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0].command, Command::Page);
    assert_eq!(frames[1].page, 1);
    assert_eq!(frames[1].payload[0], 0x11);
    assert!(frames[1].payload[1..].iter().all(|&b| b == 0xFF));
    assert_eq!(frames[2].command, Command::Run);

    let signal = encode_image(&img, &TransportConfig::default()).unwrap();
    assert_eq!(FRAME_SAMPLES, 4420);
    assert_eq!(signal.len(), 3 * 4420 + 2 * 441);
    assert_eq!(signal.len(), 14_142);
    // silence sits between frames, never after the last
    assert!(signal.samples()[4420..4420 + 441].iter().all(|&s| s == 0));
    assert_ne!(*signal.samples().last().unwrap(), 0);
}

#[test]
fn sparse_pages_are_skipped() {
    let mut img = ByteImage::new();
    img.insert(0x05, 0xAB);
    img.insert(0x300, 0xCD);
    let frames = paginate(&img).unwrap();
    let pages: Vec<u16> = frames.iter().map(|f| f.page).collect();
    assert_eq!(pages, vec![0, 6, 0]);
    assert_eq!(frames[0].payload[5], 0xAB);
    assert_eq!(frames[0].payload[0], 0xFF);
    assert_eq!(frames[0].payload.len(), PAGE_SIZE);
}

#[test]
fn empty_program_still_sends_run() {
    let out = assemble("", &AssembleOptions::new(OutputMode::Signal)).unwrap();
    let Artifact::Signal(signal) = out else { panic!("expected signal") };
    assert_eq!(signal.len(), FRAME_SAMPLES);
    assert!(signal.samples().iter().all(|s| [-1, 1].contains(s)));
}

#[test]
fn audio_is_a_wav_file() {
    let out = assemble("nop\nret", &AssembleOptions::new(OutputMode::Audio)).unwrap();
    let Artifact::Bytes(wav) = out else { panic!("expected bytes") };
    assert_eq!(&wav[..4], b"RIFF");
    assert_eq!(&wav[8..12], b"WAVE");
    // 2 frames, 1 gap, 4 bytes per stereo sample
    assert_eq!(wav.len(), 44 + (2 * FRAME_SAMPLES + 441) * 4);
}

#[test]
fn custom_transport_settings() {
    let cfg = TransportConfig::from_json(r#"{"sync_edges": 8, "silence_samples": 0}"#).unwrap();
    let mut img = ByteImage::new();
    img.insert(0, 0);
    let signal = encode_image(&img, &cfg).unwrap();
    assert_eq!(signal.len(), 2 * (8 + 1 + FRAME_LEN * 8) * SAMPLES_PER_EDGE);
}

#[test]
fn far_pages_never_alias_page_zero() {
    let err = assemble("nop\n_LOC 0x800000\nret", &AssembleOptions::new(OutputMode::Audio)).unwrap_err();
    assert_eq!(err.len(), 1);
    assert_eq!(err[0].line, 2);
    assert!(matches!(err[0].error, AsmError::ConstantRange { value: 0x80_0000, .. }));

    let out = assemble("nop\n_LOC 0x7ffffe\nret", &AssembleOptions::new(OutputMode::Signal)).unwrap();
    let Artifact::Signal(signal) = out else { panic!("expected signal") };
    assert_eq!(signal.len(), 3 * FRAME_SAMPLES + 2 * 441);

    let mut img = ByteImage::new();
    img.insert(0, 0x00);
    img.insert(0x80_0000, 0x01);
    assert_eq!(
        encode_image(&img, &TransportConfig::default()),
        Err(TransportError::PageIndex { addr: 0x80_0000, page: 0x1_0000 })
    );
}

#[test]
fn out_of_range_page_points_at_its_line() {
    use avrasm_rs::encoder::Resolved;
    use avrasm_rs::output::finish;
    use avrasm_rs::{Assembler, Line};

    let mut program = Assembler::new().assemble("nop").unwrap();
    program.image.insert(0x80_0000, 0x9508);
    program.lines.push(Line { line: 9, text: "ret".into(), offset: 0x80_0000, words: Resolved::Word(0x9508) });
    let diags = finish(&program, &AssembleOptions::new(OutputMode::Audio)).unwrap_err();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].line, 9);
    assert_eq!(
        diags[0].error,
        AsmError::Transport(TransportError::PageIndex { addr: 0x80_0000, page: 0x1_0000 })
    );
    assert!(finish(&program, &AssembleOptions::new(OutputMode::Srec)).is_ok());
}
