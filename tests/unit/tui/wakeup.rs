use super::*;

fn readable(fd: RawFd) -> bool {
    let mut pfd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let ret = unsafe { libc::poll(&mut pfd, 1, 0) };
    ret == 1 && (pfd.revents & libc::POLLIN) != 0
}

#[test]
fn wake_makes_receiver_readable_and_drain_clears_it() {
    let (tx, rx) = wakeup_pipe().unwrap();
    assert!(!readable(rx.raw_fd()));

    tx.wake();
    tx.clone().wake();
    assert!(readable(rx.raw_fd()));

    rx.drain();
    assert!(!readable(rx.raw_fd()));
}

#[test]
fn drain_on_empty_pipe_does_not_block() {
    let (_tx, rx) = wakeup_pipe().unwrap();
    rx.drain();
}
