use std::ffi::CString;
use std::io;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::addr::MacAddr;
use crate::error::{LinkError, Result};
use crate::traits::RawLink;

/// Receive buffer size. A full Ethernet frame plus headroom.
const RECV_BUF_LEN: usize = 2048;

/// Blocking `AF_PACKET` socket bound to one interface.
///
/// Sends and receives whole frames, Ethernet header included. The socket is
/// bound with `ETH_P_ALL`, so every Ethertype seen on the interface is
/// delivered; protocol matching stays with the caller per the [`RawLink`]
/// contract. Opening one requires `CAP_NET_RAW` (or root).
pub struct PacketSocket {
    fd: OwnedFd,
    iface: String,
    ifindex: u32,
    hwaddr: MacAddr,
}

impl PacketSocket {
    /// Open a packet socket bound to the named interface.
    pub fn open(iface: &str) -> Result<Self> {
        let ifindex = interface_index(iface)?;

        // SAFETY: plain socket(2) call; the returned descriptor is checked
        // below and ownership is transferred to OwnedFd.
        let fd = unsafe {
            libc::socket(
                libc::AF_PACKET,
                libc::SOCK_RAW | libc::SOCK_CLOEXEC,
                (libc::ETH_P_ALL as u16).to_be() as libc::c_int,
            )
        };
        if fd < 0 {
            return Err(open_error(iface));
        }
        // SAFETY: `fd` is a freshly opened, valid descriptor owned by nothing else.
        let fd = unsafe { OwnedFd::from_raw_fd(fd) };

        // SAFETY: sockaddr_ll is plain old data; all-zero is a valid initial value.
        let mut sll: libc::sockaddr_ll = unsafe { std::mem::zeroed() };
        sll.sll_family = libc::AF_PACKET as libc::c_ushort;
        sll.sll_protocol = (libc::ETH_P_ALL as u16).to_be();
        sll.sll_ifindex = ifindex as libc::c_int;

        // SAFETY: `sll` is a properly initialized sockaddr_ll of the size passed.
        let rc = unsafe {
            libc::bind(
                fd.as_raw_fd(),
                (&sll as *const libc::sockaddr_ll).cast::<libc::sockaddr>(),
                std::mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t,
            )
        };
        if rc != 0 {
            return Err(open_error(iface));
        }

        let hwaddr = bound_hardware_addr(&fd, iface)?;

        info!(iface, ifindex, %hwaddr, "opened packet socket");

        Ok(Self {
            fd,
            iface: iface.to_string(),
            ifindex,
            hwaddr,
        })
    }

    /// The interface this socket is bound to.
    pub fn interface(&self) -> &str {
        &self.iface
    }

    /// Kernel index of the bound interface.
    pub fn ifindex(&self) -> u32 {
        self.ifindex
    }
}

impl RawLink for PacketSocket {
    fn send_and_wait_one(&mut self, frame: &[u8], timeout: Duration) -> Result<Option<Vec<u8>>> {
        // SAFETY: `frame` is a valid readable buffer of the length passed.
        let sent = unsafe {
            libc::send(
                self.fd.as_raw_fd(),
                frame.as_ptr().cast::<libc::c_void>(),
                frame.len(),
                0,
            )
        };
        if sent < 0 {
            return Err(LinkError::Send(io::Error::last_os_error()));
        }
        debug!(iface = %self.iface, len = frame.len(), "frame sent");

        let deadline = Instant::now() + timeout;
        let mut buf = [0u8; RECV_BUF_LEN];

        loop {
            let remaining = match deadline.checked_duration_since(Instant::now()) {
                Some(remaining) if !remaining.is_zero() => remaining,
                _ => return Ok(None),
            };

            let mut pfd = libc::pollfd {
                fd: self.fd.as_raw_fd(),
                events: libc::POLLIN,
                revents: 0,
            };
            // SAFETY: `pfd` is a valid pollfd array of length 1.
            let rc = unsafe { libc::poll(&mut pfd, 1, poll_millis(remaining)) };
            if rc < 0 {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(LinkError::Recv(err));
            }
            if rc == 0 {
                // Deadline elapsed with nothing readable.
                return Ok(None);
            }

            // SAFETY: sockaddr_ll is plain old data; all-zero is a valid initial value.
            let mut from: libc::sockaddr_ll = unsafe { std::mem::zeroed() };
            let mut from_len = std::mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t;
            // SAFETY: `buf`, `from` and `from_len` are valid writable pointers
            // for the sizes passed.
            let got = unsafe {
                libc::recvfrom(
                    self.fd.as_raw_fd(),
                    buf.as_mut_ptr().cast::<libc::c_void>(),
                    buf.len(),
                    0,
                    (&mut from as *mut libc::sockaddr_ll).cast::<libc::sockaddr>(),
                    &mut from_len,
                )
            };
            if got < 0 {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(LinkError::Recv(err));
            }

            // The kernel loops our own transmission back flagged as outgoing.
            if from.sll_pkttype == libc::PACKET_OUTGOING {
                continue;
            }

            let reply = buf[..got as usize].to_vec();
            debug!(
                iface = %self.iface,
                len = reply.len(),
                pkttype = from.sll_pkttype,
                "frame received"
            );
            return Ok(Some(reply));
        }
    }

    fn hardware_addr(&self) -> MacAddr {
        self.hwaddr
    }
}

impl std::fmt::Debug for PacketSocket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PacketSocket")
            .field("iface", &self.iface)
            .field("ifindex", &self.ifindex)
            .field("hwaddr", &self.hwaddr.to_string())
            .finish()
    }
}

/// Resolve an interface name to its kernel index.
pub fn interface_index(iface: &str) -> Result<u32> {
    let name = CString::new(iface).map_err(|_| LinkError::InterfaceNotFound {
        iface: iface.to_string(),
    })?;

    // SAFETY: `name` is a valid NUL-terminated string for the duration of the call.
    let index = unsafe { libc::if_nametoindex(name.as_ptr()) };
    if index == 0 {
        return Err(LinkError::InterfaceNotFound {
            iface: iface.to_string(),
        });
    }
    Ok(index)
}

fn open_error(iface: &str) -> LinkError {
    LinkError::Open {
        iface: iface.to_string(),
        source: io::Error::last_os_error(),
    }
}

/// Read the bound interface's hardware address back from the socket.
fn bound_hardware_addr(fd: &OwnedFd, iface: &str) -> Result<MacAddr> {
    // SAFETY: sockaddr_ll is plain old data; all-zero is a valid initial value.
    let mut sll: libc::sockaddr_ll = unsafe { std::mem::zeroed() };
    let mut len = std::mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t;

    // SAFETY: `sll` and `len` are valid writable pointers for the sizes passed.
    let rc = unsafe {
        libc::getsockname(
            fd.as_raw_fd(),
            (&mut sll as *mut libc::sockaddr_ll).cast::<libc::sockaddr>(),
            &mut len,
        )
    };
    if rc != 0 {
        return Err(open_error(iface));
    }
    if sll.sll_halen as usize != 6 {
        return Err(LinkError::Open {
            iface: iface.to_string(),
            source: io::Error::new(
                io::ErrorKind::InvalidData,
                "interface has no 48-bit hardware address",
            ),
        });
    }

    let mut octets = [0u8; 6];
    octets.copy_from_slice(&sll.sll_addr[..6]);
    Ok(MacAddr(octets))
}

/// Clamp a remaining duration into poll(2)'s millisecond argument.
///
/// Sub-millisecond remainders round up to 1 so the deadline check above,
/// not a zero-timeout poll, decides when to give up.
fn poll_millis(remaining: Duration) -> libc::c_int {
    remaining.as_millis().clamp(1, libc::c_int::MAX as u128) as libc::c_int
}
