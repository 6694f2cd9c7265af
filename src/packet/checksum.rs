//! 校验和原语
//!
//! 各层校验和共用的字节求和：把整数按 8 bit 拆组后逐字节累加。

/// 小端逐字节累加一个整数的所有字节（反复 mask 再右移 8 bit）。
pub fn sum_bytes(mut num: u32) -> u32 {
    let mut sum = 0;
    while num > 0 {
        sum += num & 0xff;
        num >>= 8;
    }
    sum
}
